pub mod visualization;
#[cfg(feature = "vectors")]
pub mod vector;

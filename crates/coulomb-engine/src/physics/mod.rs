pub mod constants;
pub mod contour;
pub mod field;
pub mod force;
pub mod tracer;

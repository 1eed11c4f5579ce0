pub mod charge;
pub mod rng;

//! Error type for the layers around the pure field functions.
//!
//! The evaluator, force calculator, tracer and contour extractor never fail;
//! only charge construction, charge-set edits and configuration do.

use thiserror::Error;

use crate::api::types::ChargeId;

#[derive(Debug, Error)]
pub enum LabError {
    /// Zero, non-finite, or sign-mismatched charge value.
    #[error("invalid charge value {value}: must be finite, non-zero and match its sign")]
    InvalidCharge { value: f64 },
    #[error("no charge with id {0}")]
    UnknownCharge(ChargeId),
    #[error("invalid canvas size {width}x{height}: must be finite")]
    InvalidBounds { width: f64, height: f64 },
    #[error("charge limit of {max} reached")]
    CapacityExceeded { max: usize },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

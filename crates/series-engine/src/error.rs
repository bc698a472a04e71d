//! Series Engine Error Types

use thiserror::Error;

/// Errors from the range query, worded for direct display to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeQueryError {
    /// Lower bound must be strictly below the upper bound
    #[error("range minimum {min} must be below maximum {max}")]
    EmptyRange { min: f64, max: f64 },

    /// Bounds must be finite numbers
    #[error("range bounds must be finite numbers")]
    NonFiniteBound,
}

//! Error types for quadrature construction and limit extrapolation.
//!
//! All failures are local and synchronous: they describe bad inputs handed to
//! a rule generator or an extrapolator, never a transient condition, so
//! nothing in this crate retries.

use thiserror::Error;

/// Errors that can occur while building quadrature rules or extrapolating limits.
#[derive(Debug, Error)]
pub enum SingularError {
    /// Quadrature order (or sample count) is not positive.
    #[error("invalid quadrature domain: order {order} (must be >= 1)")]
    InvalidDomain {
        /// The rejected order
        order: usize,
    },

    /// Mapping target interval has zero length or non-finite endpoints.
    #[error("degenerate interval [{lo}, {hi}]")]
    DegenerateInterval {
        /// Lower endpoint
        lo: f64,
        /// Upper endpoint
        hi: f64,
    },

    /// Transform scale, grading exponent, or epsilon schedule is out of range.
    #[error("invalid parameters: {reason}")]
    InvalidParameters {
        /// What was wrong with the parameters
        reason: String,
    },

    /// The limit-fit (or LU) system is singular or numerically singular.
    #[error("linear system is singular or nearly singular")]
    SingularSystem,

    /// Paired inputs have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length provided
        got: usize,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for quadrature and extrapolation operations.
pub type Result<T> = std::result::Result<T, SingularError>;

impl SingularError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SingularError::InvalidParameters {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error comes from a bad rule or transform parameter.
    ///
    /// This includes `InvalidDomain`, `DegenerateInterval` and `InvalidParameters`.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            SingularError::InvalidDomain { .. }
                | SingularError::DegenerateInterval { .. }
                | SingularError::InvalidParameters { .. }
        )
    }

    /// Returns `true` if the error comes from the dense linear solve.
    pub fn is_linear_algebra_error(&self) -> bool {
        matches!(
            self,
            SingularError::SingularSystem | SingularError::DimensionMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for SingularError {
    fn from(err: serde_json::Error) -> Self {
        SingularError::Config(err.to_string())
    }
}

impl From<std::io::Error> for SingularError {
    fn from(err: std::io::Error) -> Self {
        SingularError::Config(err.to_string())
    }
}

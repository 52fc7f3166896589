//! Error type shared by every computation in the crate

use thiserror::Error;

/// Failures surfaced by the heuristics and demo generators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BloomError {
    /// Malformed or out-of-contract input, reported back to the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Evaluation produced something unusable (non-finite output).
    #[error("computation failed: {0}")]
    ComputationFailure(String),
}

impl BloomError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn computation_failure(message: impl Into<String>) -> Self {
        Self::ComputationFailure(message.into())
    }

    /// True for errors caused by the caller's input
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, BloomError>;

/// Fail with `ComputationFailure` unless `value` is finite.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BloomError::computation_failure(format!(
            "{what} evaluated to {value}"
        )))
    }
}

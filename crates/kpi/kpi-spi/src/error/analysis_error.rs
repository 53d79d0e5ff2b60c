//! Analysis error types

use thiserror::Error;

/// Errors that can occur during KPI analysis.
///
/// Degenerate but valid numeric cases (flat series, zero baseline, empty
/// statistics input) are not errors and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input rejected: series too short, horizon < 1, malformed pools, ...
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No driver pools are registered for the category
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),
}

impl AnalysisError {
    /// Build an `InvalidInput` error from any message
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// `InvalidInput` for a series shorter than an operation needs
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::invalid(format!(
            "need at least {} points, got {}",
            required, actual
        ))
    }
}

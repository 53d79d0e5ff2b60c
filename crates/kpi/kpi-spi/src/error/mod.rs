//! Error module containing error types and result aliases

mod analysis_error;

pub use analysis_error::AnalysisError;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

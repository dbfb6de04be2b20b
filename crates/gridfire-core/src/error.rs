//! Unified error types for the GridFire pipeline.
//!
//! This module provides a common error type [`RiskError`] that can represent
//! errors from any stage of the risk pipeline. Per-record problems are
//! handled with skip-and-continue at the importer/extractor level and never
//! surface as `RiskError`; everything here is a run-level failure.

use thiserror::Error;

/// Unified error type for all GridFire operations.
///
/// Per the pipeline's propagation policy, these are structural failures that
/// abort the run: missing or unreadable inputs, malformed grids or configs,
/// and empty spatial indexes. Recoverable per-record issues (a bad CSV row,
/// an out-of-bounds observation) are counted and skipped instead.
#[derive(Error, Debug)]
pub enum RiskError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors (dimension mismatches, non-finite required fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (bad config file, missing required table)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An environmental point-set was empty when the spatial matcher was built.
    /// Fatal: a matcher with nothing to match against cannot produce an argmin.
    #[error("Empty spatial index: {0}")]
    EmptyIndex(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using RiskError.
pub type RiskResult<T> = Result<T, RiskError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for RiskError {
    fn from(err: anyhow::Error) -> Self {
        RiskError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for RiskError {
    fn from(s: String) -> Self {
        RiskError::Other(s)
    }
}

impl From<&str> for RiskError {
    fn from(s: &str) -> Self {
        RiskError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for RiskError {
    fn from(err: serde_json::Error) -> Self {
        RiskError::Parse(err.to_string())
    }
}

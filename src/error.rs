//! Custom error types for retail-forecast
//!
//! This module defines the error hierarchy for the pipeline using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input dataset does not exist (checked before any read)
    #[error("Dataset not found at: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// Nothing is left to forecast after cleaning and filtering
    #[error("Monthly revenue series is empty after cleaning")]
    EmptySeries,

    /// Validation errors for parameters and inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Too few observations for the requested operation
    #[error("Insufficient data for {context}: need at least {needed}, got {got}")]
    InsufficientData {
        context: &'static str,
        needed: usize,
        got: usize,
    },

    /// Numerical failure while fitting or forecasting
    #[error("Model error: {0}")]
    Model(String),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Chart rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Create a "dataset not found" error
    pub fn dataset_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DatasetNotFound { path: path.into() }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DatasetNotFound { .. })
    }

    /// Check if this is an "empty series" error
    pub fn is_empty_series(&self) -> bool {
        matches!(self, Self::EmptySeries)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PipelineError::dataset_not_found("data/missing.csv");
        assert_eq!(err.to_string(), "Dataset not found at: data/missing.csv");
        assert!(err.is_not_found());
        assert!(!err.is_empty_series());
    }

    #[test]
    fn test_insufficient_data_error() {
        let err = PipelineError::InsufficientData {
            context: "SARIMA fit",
            needed: 5,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data for SARIMA fit: need at least 5, got 3"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PipelineError = io_err.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}

//! Error handling module for enginelint
//!
//! Provides the library error type using thiserror. Loading and lookup
//! failures surface as `EngineLintError`; content problems are never errors,
//! they are reported as lint findings.

use thiserror::Error;

/// Main error type for enginelint
#[derive(Error, Debug)]
pub enum EngineLintError {
    /// IO errors (reading data or config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lint configuration errors (loading, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A brand or engine key that is not present in the page data
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content that cannot be interpreted at all (as opposed to lint findings)
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for enginelint operations
pub type Result<T> = std::result::Result<T, EngineLintError>;

impl EngineLintError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineLintError::config("numeric_tolerance out of range");
        assert_eq!(
            err.to_string(),
            "Configuration error: numeric_tolerance out of range"
        );

        let err = EngineLintError::not_found("engine 'saab/b999'");
        assert_eq!(err.to_string(), "Not found: engine 'saab/b999'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EngineLintError = io_err.into();
        assert!(matches!(err, EngineLintError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: EngineLintError = json_err.into();
        assert!(matches!(err, EngineLintError::Json(_)));
    }
}

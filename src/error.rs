//! Error types for sqlcalc
//!
//! This module defines all error types used throughout the service.

use thiserror::Error;

/// The main error type for sqlcalc
#[derive(Error, Debug)]
pub enum Error {
    // ========== Configuration Errors ==========
    #[error("Configuration error: missing environment variable '{0}'")]
    MissingEnv(&'static str),

    // ========== Backing Engine Errors ==========
    // The text of these variants is reflected verbatim to the client,
    // so Display adds no category prefix.
    #[error("{0}")]
    Backend(#[from] mysql::Error),

    #[error("{0}")]
    Execution(String),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for sqlcalc operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingEnv("MYSQL_PASSWORD");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing environment variable 'MYSQL_PASSWORD'"
        );

        let err = Error::Execution("Unknown column 'foo' in 'field list'".to_string());
        assert_eq!(err.to_string(), "Unknown column 'foo' in 'field list'");
    }
}

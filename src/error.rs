//! Error types for library_checker

use thiserror::Error;

/// Unified error type for loading, catalog lookups and report output
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Reading list could not be parsed as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP request failed (network error, timeout, body decoding)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
}

/// Result alias for library_checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;

//! Error types for Sheets operations.

use thiserror::Error;

/// Errors that can occur when talking to the Sheets API.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("Sheets API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Spreadsheet, sheet or range does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token exchange failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Service account key is unusable
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// Credentials file could not be read
    #[error("Failed to read credentials: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client misconfiguration (bad base URL and the like)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Row numbers are 1-based
    #[error("Invalid row {0}: rows are numbered from 1")]
    InvalidRow(usize),

    /// A row write was requested with no placed values
    #[error("Nothing to write: no values were placed in the row")]
    EmptyRow,
}

//! Error types for the relay pipeline.

use sheets::SheetsError;
use thiserror::Error;

/// The inbound body could not be parsed. Surfaces as `400 Bad Request`.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// A parsed submission could not be relayed. Logged, then acknowledged anyway.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `answer.data` is absent or not an object
    #[error("Submission has no answer data")]
    MissingAnswers,

    /// A reserved header (`sid`, `gid`) is absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// `gid` is not a number
    #[error("Invalid sheet id: {0:?}")]
    InvalidSheetId(String),

    /// No submitted header appears in the header row
    #[error("None of the submitted headers appear in header row {row}")]
    NoMatchingColumns { row: usize },

    /// Spreadsheet lookup or write failed
    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

//! Error types for Punchcard

use thiserror::Error;

/// Errors that can occur while processing an attendance export
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Input table shape error: {0}")]
    ShapeError(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed attendance entry at row {row}, column \"{column}\": {reason}")]
    MalformedEntry {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Invalid reporting period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

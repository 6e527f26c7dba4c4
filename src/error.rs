//! Error taxonomy for the guide
//!
//! The table operations never surface these to the user. They exist so the
//! degradations (missing body, unparsable number, storage failure) can be
//! described in one place and logged consistently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    /// A required part of the table (body, cell, control) is absent
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    /// A numeric column held text that could not be read as a number
    #[error("unparsable value: {0:?}")]
    UnparsableValue(String),

    /// The preference storage could not be read or written
    #[error("storage error: {0}")]
    Storage(String),

    /// A data file could not be turned into a table
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },
}

impl From<std::io::Error> for GuideError {
    fn from(err: std::io::Error) -> Self {
        GuideError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for GuideError {
    fn from(err: serde_json::Error) -> Self {
        GuideError::Storage(err.to_string())
    }
}

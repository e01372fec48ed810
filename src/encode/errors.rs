//! # Encoding Errors
//!
//! Error types for rendering and decoding selections.

use thiserror::Error;

/// Result type for encode operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while encoding or decoding a selection
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested output format is not one of `json` or `csv`
    #[error("Unknown output format: '{0}'")]
    UnknownFormat(String),

    /// Delimited writing failed
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// The delimited writer's buffer could not be recovered
    #[error("CSV writer failed: {0}")]
    Io(#[from] std::io::Error),

    /// Structured-record input is not valid JSON
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured-record input is not a JSON array
    #[error("Record payload must be a JSON array")]
    NotAnArray,

    /// An element of the record array is not a JSON object
    #[error("Record {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// A record object carries a key outside the table schema
    #[error("Record field does not match any column: {0}")]
    UnknownField(String),

    /// A record value does not fit its column's role
    #[error("Record value for column {column} is invalid: {value}")]
    BadField { column: String, value: String },
}

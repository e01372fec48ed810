//! # Schema Errors
//!
//! Error types for column registry lookups and cell normalization.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema and normalization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Lookup of a column name not present in the registry
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A required column is absent from the source header
    #[error("Required column missing from header: {0}")]
    MissingColumn(&'static str),

    /// Two source headers mapped to the same canonical column
    #[error("Duplicate column in header: {0}")]
    DuplicateColumn(String),

    /// An id cell failed integer parsing (row index is 0-based)
    #[error("Row {row}: id value '{value}' is not an integer")]
    InvalidId { row: usize, value: String },

    /// A timestamp cell failed parsing under strict mode
    #[error("Row {row}: timestamp '{value}' is not in M/D/Y H:M:S AM/PM form")]
    InvalidTimestamp { row: usize, value: String },
}

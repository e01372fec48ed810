//! # Load Errors
//!
//! Error types for reading and normalizing the source dataset.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while turning a source file into a record store
#[derive(Debug, Error)]
pub enum LoadError {
    /// The backing file cannot be read
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not well-formed delimited text
    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    /// Header mapping or cell normalization failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The normalized table has zero data rows
    #[error("Dataset contains no data rows")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_errors_pass_through() {
        let err = LoadError::from(SchemaError::MissingColumn("id"));
        assert_eq!(err.to_string(), "Required column missing from header: id");
    }
}

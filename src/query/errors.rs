//! # Query Errors
//!
//! Error types for the filter/aggregate engine.
//!
//! `NoRecords` is the designed empty-result signal for well-formed queries
//! and is deliberately distinct from the malformed-query errors around it:
//! a count of zero is an answer, an unparseable date is not.

use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::LoadError;

/// Result type for engine operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while answering a query
#[derive(Debug, Error)]
pub enum QueryError {
    /// Filter names a column the registry does not know
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Date filter value failed every accepted format
    #[error("Unparseable date: '{0}'")]
    BadDate(String),

    /// Raw id value is not an integer
    #[error("Invalid value for column {column}: '{value}'")]
    BadValue { column: String, value: String },

    /// Pagination parameter is negative or not an integer
    #[error("Invalid {name} parameter: '{value}'")]
    BadParam { name: &'static str, value: String },

    /// Well-formed query, empty result
    #[error("No Records")]
    NoRecords,

    /// The dataset could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl From<SchemaError> for QueryError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownColumn(name) => QueryError::UnknownColumn(name),
            other => QueryError::Load(LoadError::Schema(other)),
        }
    }
}

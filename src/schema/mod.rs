//! Schema subsystem for delayline
//!
//! Owns the canonical shape of the incident table:
//!
//! - Column registry mapping source headers to canonical names and roles
//! - The `Cell` value every raw field normalizes into
//! - Normalization rules for timestamps, null tokens, and ids
//!
//! Normalization is deterministic: the same source bytes produce the same
//! cells in the same order, regardless of query traffic.

mod errors;
mod normalize;
mod types;
mod value;

pub use errors::{SchemaError, SchemaResult};
pub use normalize::{
    is_null_token, normalize_cell, parse_query_date, parse_source_timestamp, ParseMode,
    SOURCE_TIMESTAMP_FORMAT,
};
pub use types::{
    ColumnDef, ColumnRole, TableSchema, BORO_COLUMN, DATE_COLUMN, ID_COLUMN, REASON_COLUMN,
};
pub use value::Cell;

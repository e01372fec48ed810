//! Query subsystem for delayline
//!
//! The filter/aggregate engine and its pagination layer. Endpoints compose
//! the pieces in a fixed order: select, paginate, empty-check, encode.

mod engine;
mod errors;
mod params;

pub use engine::{parse_id, require_records, QueryEngine};
pub use errors::{QueryError, QueryResult};
pub use params::{PageParams, DEFAULT_LIMIT};

//! Cell normalization
//!
//! Raw source cells become canonical [`Cell`] values here, before any
//! comparison runs anywhere else in the system.
//!
//! - Null-like tokens (`nan`, `none`, case-insensitive, and the empty
//!   field) rewrite to `Cell::Missing`. No trimming: ` nan` is text.
//! - Timestamps arrive as `02/27/2025 10:00:00 AM` and truncate to a
//!   calendar date. Strict mode fails the load on the first bad timestamp;
//!   lenient mode keeps the row with `Cell::Invalid` carrying the raw text.
//! - Id cells must parse as integers in both modes. A table with broken
//!   ids cannot answer id lookups, so the load fails instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnDef, ColumnRole};
use super::value::Cell;

/// Timestamp format of the source dataset
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Date formats accepted in query values, tried in order
const QUERY_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// How the loader reacts to unparseable timestamp cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// First bad timestamp fails the load
    Strict,
    /// Bad timestamps become `Cell::Invalid`, the row is retained
    #[default]
    Lenient,
}

impl ParseMode {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Strict => "strict",
            ParseMode::Lenient => "lenient",
        }
    }
}

/// Returns true for null-like source tokens.
///
/// Matching is exact after lowercasing; the empty field counts because the
/// source surfaces blank CSV fields the same way it surfaces `NaN`.
pub fn is_null_token(raw: &str) -> bool {
    raw.is_empty() || matches!(raw.to_lowercase().as_str(), "nan" | "none")
}

/// Parse a source timestamp, discarding the time of day
pub fn parse_source_timestamp(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, SOURCE_TIMESTAMP_FORMAT).ok()
}

/// Parse a query-supplied date value.
///
/// Accepts ISO `2025-02-27`, source-style `02/27/2025`, and a full source
/// timestamp, in that order.
pub fn parse_query_date(raw: &str) -> Option<NaiveDate> {
    for format in QUERY_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    parse_source_timestamp(raw)
}

/// Normalize one raw source cell for the given column.
///
/// `row` is the 0-based data-row ordinal, used only in error messages.
pub fn normalize_cell(
    def: &ColumnDef,
    raw: &str,
    mode: ParseMode,
    row: usize,
) -> SchemaResult<Cell> {
    match def.role {
        ColumnRole::Id => raw.parse::<i64>().map(Cell::Int).map_err(|_| {
            SchemaError::InvalidId {
                row,
                value: raw.to_string(),
            }
        }),
        ColumnRole::Date => {
            if is_null_token(raw) {
                return Ok(Cell::Missing);
            }
            match parse_source_timestamp(raw) {
                Some(date) => Ok(Cell::Date(date)),
                None => match mode {
                    ParseMode::Strict => Err(SchemaError::InvalidTimestamp {
                        row,
                        value: raw.to_string(),
                    }),
                    ParseMode::Lenient => Ok(Cell::Invalid(raw.to_string())),
                },
            }
        }
        ColumnRole::Category | ColumnRole::Text => {
            if is_null_token(raw) {
                Ok(Cell::Missing)
            } else {
                Ok(Cell::Text(raw.to_string()))
            }
        }
    }
}

//! Canonical cell values
//!
//! Every source cell normalizes into exactly one `Cell` variant before any
//! comparison runs. `Missing` is the absence marker for null-like tokens and
//! is distinct from the empty string. `Invalid` carries raw text that failed
//! timestamp parsing under lenient mode; it renders as-is but never matches
//! a filter probe.

use chrono::NaiveDate;
use serde_json::Value;

/// A single normalized cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// 64-bit signed integer (the id column)
    Int(i64),
    /// Calendar date with time-of-day discarded
    Date(NaiveDate),
    /// UTF-8 text
    Text(String),
    /// Absence marker for null-like source tokens
    Missing,
    /// Unparseable timestamp retained under lenient mode (raw source text)
    Invalid(String),
}

impl Cell {
    /// Exact-match comparison against a filter probe.
    ///
    /// `Invalid` cells match nothing, including an identical `Invalid` probe.
    /// `Missing` matches only a `Missing` probe, never the literal text
    /// "none".
    pub fn matches(&self, probe: &Cell) -> bool {
        match self {
            Cell::Invalid(_) => false,
            _ => self == probe,
        }
    }

    /// Renders the cell as a delimited-text field.
    ///
    /// Dates render as ISO `YYYY-MM-DD`; `Missing` renders as the empty
    /// field; `Invalid` renders its raw source text.
    pub fn render(&self) -> String {
        match self {
            Cell::Int(n) => n.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Missing => String::new(),
            Cell::Invalid(raw) => raw.clone(),
        }
    }

    /// Converts the cell to its structured-record JSON value.
    ///
    /// Dates become ISO `YYYY-MM-DD` strings, the same representation the
    /// delimited form uses; `Missing` becomes JSON null.
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Int(n) => Value::from(*n),
            Cell::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Missing => Value::Null,
            Cell::Invalid(raw) => Value::String(raw.clone()),
        }
    }

    /// Returns true for the absence marker
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

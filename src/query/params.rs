//! Pagination parameters
//!
//! Parsed from raw query-string values. Defaults apply when a parameter is
//! absent; a present-but-broken value is rejected, never silently
//! defaulted.

use super::errors::{QueryError, QueryResult};

/// Page size when the caller does not supply one
pub const DEFAULT_LIMIT: usize = 10;

/// Parsed limit/offset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Number of rows in the page
    pub limit: usize,
    /// Number of rows to skip
    pub offset: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageParams {
    /// Parse raw limit/offset values.
    ///
    /// `None` means the parameter was absent and the default applies.
    /// Negative and non-integer values are rejected.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> QueryResult<Self> {
        Ok(Self {
            limit: parse_count("limit", limit, DEFAULT_LIMIT)?,
            offset: parse_count("offset", offset, 0)?,
        })
    }
}

fn parse_count(name: &'static str, raw: Option<&str>, default: usize) -> QueryResult<usize> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value: i64 = raw.parse().map_err(|_| QueryError::BadParam {
        name,
        value: raw.to_string(),
    })?;

    if value < 0 {
        return Err(QueryError::BadParam {
            name,
            value: raw.to_string(),
        });
    }

    Ok(value as usize)
}

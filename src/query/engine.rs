//! Filter/aggregate engine
//!
//! The four query shapes every endpoint is built from, each running over a
//! dataset obtained through the provider's reload policy:
//!
//! 1. `count_by_exact`: how many rows match column = value
//! 2. `select_by_exact`: the rows matching column = value
//! 3. `select_by_arbitrary`: caller-supplied column, or the full table
//!    when no filter is given
//! 4. `select_by_id`: the rows carrying an integer id
//!
//! Counting treats zero matches as a valid answer, malformed values
//! included: an id value that does not parse matches nothing and counts
//! 0. The one exception is the date column, where an unparseable date
//! string is rejected.

use std::sync::Arc;

use crate::schema::{parse_query_date, Cell, ColumnDef, ColumnRole};
use crate::store::{DatasetProvider, Selection};

use super::errors::{QueryError, QueryResult};

/// The query engine over one dataset provider
pub struct QueryEngine {
    provider: Arc<DatasetProvider>,
}

impl QueryEngine {
    /// Create an engine over the given provider
    pub fn new(provider: Arc<DatasetProvider>) -> Self {
        Self { provider }
    }

    /// The provider this engine queries through
    pub fn provider(&self) -> &DatasetProvider {
        &self.provider
    }

    /// Count rows where `column` exactly matches `value`.
    ///
    /// A value that matches nothing counts 0, malformed ids included;
    /// only an unparseable date string is an error.
    pub fn count_by_exact(&self, column: &str, value: &str) -> QueryResult<usize> {
        let store = self.provider.dataset()?;
        let (_, def) = store.schema().lookup(column)?;
        let probe = build_probe(def, value)?;
        Ok(store.count_where(column, &probe)?)
    }

    /// Select rows where `column` exactly matches `value`, in load order
    pub fn select_by_exact(&self, column: &str, value: &str) -> QueryResult<Selection> {
        let store = self.provider.dataset()?;
        let (_, def) = store.schema().lookup(column)?;
        let probe = build_probe(def, value)?;
        Ok(store.select_where(column, &probe)?)
    }

    /// Select rows by a caller-supplied filter, or the full table when no
    /// filter is given.
    ///
    /// The empty filter deliberately means "everything": the listing
    /// endpoint pages through the whole table with it.
    pub fn select_by_arbitrary(&self, filter: Option<(&str, &str)>) -> QueryResult<Selection> {
        match filter {
            Some((column, value)) => self.select_by_exact(column, value),
            None => {
                let store = self.provider.dataset()?;
                Ok(store.select_all())
            }
        }
    }

    /// Select every row carrying the given id; zero rows is a valid result
    pub fn select_by_id(&self, id: i64) -> QueryResult<Selection> {
        let store = self.provider.dataset()?;
        Ok(store.select_by_id(id)?)
    }
}

/// Parse a raw id path segment
pub fn parse_id(raw: &str) -> QueryResult<i64> {
    raw.parse::<i64>().map_err(|_| QueryError::BadValue {
        column: "id".to_string(),
        value: raw.to_string(),
    })
}

/// The empty check: pass a non-empty selection through, reject an empty
/// one with `NoRecords`.
///
/// Runs after pagination on the record endpoints, so an out-of-range page
/// over a non-empty selection still signals `NoRecords`.
pub fn require_records(selection: Selection) -> QueryResult<Selection> {
    if selection.is_empty() {
        Err(QueryError::NoRecords)
    } else {
        Ok(selection)
    }
}

/// Build the cell a filter value probes with.
///
/// An unparseable date is the one rejection. An unparseable id value
/// probes as `Cell::Invalid`, which matches no stored cell, so the query
/// answers zero instead of failing.
fn build_probe(def: &ColumnDef, value: &str) -> QueryResult<Cell> {
    match def.role {
        ColumnRole::Id => match value.parse::<i64>() {
            Ok(id) => Ok(Cell::Int(id)),
            Err(_) => Ok(Cell::Invalid(value.to_string())),
        },
        ColumnRole::Date => parse_query_date(value)
            .map(Cell::Date)
            .ok_or_else(|| QueryError::BadDate(value.to_string())),
        ColumnRole::Category | ColumnRole::Text => Ok(Cell::Text(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParseMode;
    use crate::store::ReloadPolicy;
    use std::fs;
    use tempfile::TempDir;

    const FIXTURE: &str = "\
Busbreakdown_ID,Occurred_On,Reason,Boro
1,02/27/2025 10:00:00 AM,Mechanical,Manhattan
2,02/27/2025 11:30:00 AM,Mechanical,Bronx
3,02/28/2025 08:15:00 AM,Accident,Brooklyn
4,03/01/2025 09:45:00 AM,Weather,Queens
";

    fn fixture_engine(dir: &TempDir) -> QueryEngine {
        let path = dir.path().join("delays.csv");
        fs::write(&path, FIXTURE).unwrap();
        let provider = DatasetProvider::new(path, ParseMode::Lenient, ReloadPolicy::PerRequest);
        QueryEngine::new(Arc::new(provider))
    }

    #[test]
    fn test_count_by_date_both_forms() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        assert_eq!(engine.count_by_exact("occurred_on", "2025-02-27").unwrap(), 2);
        assert_eq!(engine.count_by_exact("occurred_on", "02/27/2025").unwrap(), 2);
    }

    #[test]
    fn test_count_zero_is_an_answer() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        assert_eq!(engine.count_by_exact("reason", "Unknown").unwrap(), 0);
        assert_eq!(engine.count_by_exact("occurred_on", "2025-12-25").unwrap(), 0);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        let err = engine.count_by_exact("occurred_on", "Febuary 27").unwrap_err();
        assert!(matches!(err, QueryError::BadDate(_)));
    }

    #[test]
    fn test_malformed_id_value_counts_zero() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        assert_eq!(engine.count_by_exact("id", "4").unwrap(), 1);
        assert_eq!(engine.count_by_exact("id", "not-a-number").unwrap(), 0);
        assert!(engine
            .select_by_exact("id", "not-a-number")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        let err = engine.select_by_exact("depot", "Queens").unwrap_err();
        assert!(matches!(err, QueryError::UnknownColumn(_)));
    }

    #[test]
    fn test_no_filter_returns_full_table() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        let all = engine.select_by_arbitrary(None).unwrap();
        assert_eq!(all.len(), 4);

        let filtered = engine
            .select_by_arbitrary(Some(("boro", "Queens")))
            .unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_select_by_id() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        let hit = engine.select_by_id(4).unwrap();
        assert_eq!(hit.len(), 1);

        let miss = engine.select_by_id(99).unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn test_require_records_gate() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        let selection = engine.select_by_exact("reason", "Mechanical").unwrap();
        let kept = require_records(selection).unwrap();
        assert_eq!(kept.len(), 2);

        let empty = engine.select_by_exact("reason", "Flood").unwrap();
        let err = require_records(empty).unwrap_err();
        assert!(matches!(err, QueryError::NoRecords));
    }

    #[test]
    fn test_out_of_range_page_hits_no_records() {
        let dir = TempDir::new().unwrap();
        let engine = fixture_engine(&dir);

        let selection = engine.select_by_arbitrary(None).unwrap();
        let page = selection.paginate(10, 40);
        let err = require_records(page).unwrap_err();
        assert!(matches!(err, QueryError::NoRecords));
    }

    #[test]
    fn test_parse_id_rejects_non_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(
            parse_id("forty-two"),
            Err(QueryError::BadValue { .. })
        ));
    }

    #[test]
    fn test_load_failure_surfaces_through_engine() {
        let dir = TempDir::new().unwrap();
        let provider = DatasetProvider::new(
            dir.path().join("absent.csv"),
            ParseMode::Lenient,
            ReloadPolicy::PerRequest,
        );
        let engine = QueryEngine::new(Arc::new(provider));

        let err = engine.count_by_exact("reason", "Mechanical").unwrap_err();
        assert!(matches!(err, QueryError::Load(_)));
    }
}

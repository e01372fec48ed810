//! In-memory record store
//!
//! The normalized table every query runs against. Rows are immutable for
//! the lifetime of one load; a fresh load re-derives the whole set. Lookups
//! are exact-match only: no substring matching, no case folding, no partial
//! dates.

use crate::schema::{Cell, SchemaResult, TableSchema, ID_COLUMN};

/// One normalized row.
///
/// `ordinal` is the dense 0-based display index assigned at load. It is a
/// presentation detail, not a stable identifier: the same record can move
/// between loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Dense 0-based display index
    pub ordinal: usize,
    /// Cells parallel to the schema's column order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Returns the cell at a column index, if in range
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

/// The loaded, normalized incident table
#[derive(Debug, Clone)]
pub struct RecordStore {
    schema: TableSchema,
    rows: Vec<Row>,
}

impl RecordStore {
    /// Build a store from normalized cell rows, assigning dense ordinals
    pub fn new(schema: TableSchema, cells: Vec<Vec<Cell>>) -> Self {
        let rows = cells
            .into_iter()
            .enumerate()
            .map(|(ordinal, cells)| Row { ordinal, cells })
            .collect();
        Self { schema, rows }
    }

    /// The column registry for this table
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count rows whose cell in `column` exactly matches `probe`
    pub fn count_where(&self, column: &str, probe: &Cell) -> SchemaResult<usize> {
        let (index, _) = self.schema.lookup(column)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| row.cell(index).is_some_and(|cell| cell.matches(probe)))
            .count())
    }

    /// Select rows whose cell in `column` exactly matches `probe`,
    /// preserving load order
    pub fn select_where(&self, column: &str, probe: &Cell) -> SchemaResult<Selection> {
        let (index, _) = self.schema.lookup(column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row.cell(index).is_some_and(|cell| cell.matches(probe)))
            .cloned()
            .collect();
        Ok(Selection::new(self.schema.clone(), rows))
    }

    /// Select every row carrying the given id.
    ///
    /// The store does not enforce id uniqueness; zero, one, or several rows
    /// may come back.
    pub fn select_by_id(&self, id: i64) -> SchemaResult<Selection> {
        self.select_where(ID_COLUMN, &Cell::Int(id))
    }

    /// Select the full table in load order
    pub fn select_all(&self) -> Selection {
        Selection::new(self.schema.clone(), self.rows.clone())
    }
}

/// An ordered, transient slice of the table.
///
/// Produced by one filter operation and handed between the engine, the
/// pagination step, and the encoders. Owns its rows; dropping it never
/// touches the store.
#[derive(Debug, Clone)]
pub struct Selection {
    schema: TableSchema,
    rows: Vec<Row>,
}

impl Selection {
    /// Create a selection over the given rows
    pub fn new(schema: TableSchema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    /// The column registry the rows conform to
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// The selected rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of selected rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the selected rows
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Slice out one page, preserving order.
    ///
    /// An offset beyond the end yields an empty selection, not an error.
    pub fn paginate(&self, limit: usize, offset: usize) -> Selection {
        let rows = self
            .rows
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Selection::new(self.schema.clone(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnRole, SchemaError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample_store() -> RecordStore {
        let schema =
            TableSchema::from_headers(["Busbreakdown_ID", "Occurred_On", "Reason", "Boro"])
                .unwrap();
        RecordStore::new(
            schema,
            vec![
                vec![Cell::Int(1), date(2025, 2, 27), text("Mechanical"), text("Manhattan")],
                vec![Cell::Int(2), date(2025, 2, 27), text("Mechanical"), text("Bronx")],
                vec![Cell::Int(3), date(2025, 2, 28), text("Accident"), Cell::Missing],
                vec![Cell::Int(4), date(2025, 3, 1), text("Weather"), text("Queens")],
            ],
        )
    }

    #[test]
    fn test_ordinals_are_dense_from_zero() {
        let store = sample_store();
        let all = store.select_all();
        let ordinals: Vec<usize> = all.iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_count_where_exact_match() {
        let store = sample_store();
        assert_eq!(
            store.count_where("reason", &text("Mechanical")).unwrap(),
            2
        );
        assert_eq!(store.count_where("reason", &text("mechanical")).unwrap(), 0);
        assert_eq!(store.count_where("boro", &text("Queens")).unwrap(), 1);
    }

    #[test]
    fn test_count_where_unknown_column() {
        let store = sample_store();
        let err = store.count_where("depot", &text("x")).unwrap_err();
        assert_eq!(err, SchemaError::UnknownColumn("depot".to_string()));
    }

    #[test]
    fn test_missing_probe_finds_null_cells_only() {
        let store = sample_store();
        assert_eq!(store.count_where("boro", &Cell::Missing).unwrap(), 1);
        assert_eq!(store.count_where("boro", &text("none")).unwrap(), 0);
        assert_eq!(store.count_where("boro", &text("")).unwrap(), 0);
    }

    #[test]
    fn test_select_where_preserves_order() {
        let store = sample_store();
        let selection = store.select_where("reason", &text("Mechanical")).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.rows()[0].cells[0], Cell::Int(1));
        assert_eq!(selection.rows()[1].cells[0], Cell::Int(2));
    }

    #[test]
    fn test_select_by_id_zero_or_more() {
        let store = sample_store();

        let hit = store.select_by_id(4).unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit.rows()[0].cells[3], text("Queens"));

        let miss = store.select_by_id(99).unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn test_paginate_slices_in_order() {
        let store = sample_store();
        let all = store.select_all();

        let page = all.paginate(2, 0);
        assert_eq!(page.len(), 2);
        assert_eq!(page.rows()[0].ordinal, 0);

        let page = all.paginate(2, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.rows()[0].ordinal, 2);

        let tail = all.paginate(10, 3);
        assert_eq!(tail.len(), 1);
    }

    #[test]
    fn test_paginate_beyond_end_is_empty() {
        let store = sample_store();
        let all = store.select_all();
        assert!(all.paginate(10, 100).is_empty());
        assert!(all.paginate(0, 0).is_empty());
    }

    #[test]
    fn test_date_probe_matches_normalized_cells() {
        let store = sample_store();
        let probe = date(2025, 2, 27);
        assert_eq!(store.count_where("occurred_on", &probe).unwrap(), 2);
    }

    #[test]
    fn test_invalid_cell_never_matches() {
        let schema =
            TableSchema::from_headers(["Busbreakdown_ID", "Occurred_On", "Reason", "Boro"])
                .unwrap();
        let store = RecordStore::new(
            schema,
            vec![vec![
                Cell::Int(1),
                Cell::Invalid("garbled".to_string()),
                text("Heavy Traffic"),
                text("Bronx"),
            ]],
        );

        assert_eq!(
            store
                .count_where("occurred_on", &Cell::Invalid("garbled".to_string()))
                .unwrap(),
            0
        );
        assert_eq!(
            store.count_where("occurred_on", &text("garbled")).unwrap(),
            0
        );
    }
}

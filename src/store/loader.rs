//! CSV loader
//!
//! Reads the source dataset, maps its header through the column registry,
//! and normalizes every cell. The loader is the only place raw source text
//! enters the system; everything downstream sees canonical cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::schema::{normalize_cell, Cell, ParseMode, TableSchema};

use super::errors::{LoadError, LoadResult};
use super::table::RecordStore;

/// Load and normalize a dataset from a file path
pub fn load_path(path: &Path, mode: ParseMode) -> LoadResult<RecordStore> {
    let file = File::open(path)?;
    load_reader(file, mode)
}

/// Load and normalize a dataset from any reader.
///
/// Fails on an unmappable header, a malformed record, a bad id cell, a bad
/// timestamp under strict mode, or a table with zero data rows.
pub fn load_reader<R: Read>(source: R, mode: ParseMode) -> LoadResult<RecordStore> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let schema = TableSchema::from_headers(headers.iter())?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (ordinal, record) in reader.records().enumerate() {
        let record = record?;
        let mut cells = Vec::with_capacity(schema.len());
        for (index, def) in schema.columns().iter().enumerate() {
            let raw = record.get(index).unwrap_or("");
            cells.push(normalize_cell(def, raw, mode, ordinal)?);
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(RecordStore::new(schema, rows))
}

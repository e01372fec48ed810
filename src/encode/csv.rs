//! Delimited-text codec
//!
//! Renders a selection as CSV: one header row of canonical column names in
//! table-definition order, then one line per selected row. Dates render as
//! ISO `YYYY-MM-DD`, `Missing` as the empty field, `Invalid` as its raw
//! source text.

use crate::store::Selection;

use super::errors::EncodeResult;

/// Encode a selection as delimited text
pub fn encode_csv(selection: &Selection) -> EncodeResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(selection.schema().names())?;
    for row in selection.iter() {
        writer.write_record(row.cells.iter().map(|cell| cell.render()))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

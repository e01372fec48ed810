//! Structured-record codec
//!
//! The JSON face of a selection: an array of objects keyed by canonical
//! column name. Dates carry the same ISO `YYYY-MM-DD` text the delimited
//! form uses, so the two encodings agree on every value and the round trip
//! through the decoder is exact.

use serde_json::{Map, Value};

use crate::schema::{parse_query_date, Cell, ColumnRole, TableSchema};
use crate::store::{Row, Selection};

use super::errors::{EncodeError, EncodeResult};

/// Encode a selection as a JSON array of record objects.
///
/// `Missing` cells become JSON null; `Invalid` cells carry their raw
/// source text.
pub fn encode_records(selection: &Selection) -> Value {
    let records = selection
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (def, cell) in selection.schema().columns().iter().zip(&row.cells) {
                object.insert(def.name.clone(), cell.to_json());
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(records)
}

/// Decode the structured-record form back into rows.
///
/// Accepts exactly what `encode_records` produces: an array of objects
/// whose keys are registered columns. Null decodes to `Missing`; a date
/// string that fails parsing decodes to `Invalid`, mirroring a lenient
/// load.
pub fn decode_records(text: &str, schema: &TableSchema) -> EncodeResult<Vec<Row>> {
    let payload: Value = serde_json::from_str(text)?;
    let Value::Array(records) = payload else {
        return Err(EncodeError::NotAnArray);
    };

    let mut rows = Vec::with_capacity(records.len());
    for (ordinal, record) in records.into_iter().enumerate() {
        let Value::Object(object) = record else {
            return Err(EncodeError::NotAnObject { index: ordinal });
        };

        for key in object.keys() {
            if schema.lookup(key).is_err() {
                return Err(EncodeError::UnknownField(key.clone()));
            }
        }

        let mut cells = Vec::with_capacity(schema.len());
        for def in schema.columns() {
            let value = object.get(&def.name).unwrap_or(&Value::Null);
            cells.push(decode_cell(def.role, &def.name, value)?);
        }
        rows.push(Row { ordinal, cells });
    }

    Ok(rows)
}

fn decode_cell(role: ColumnRole, column: &str, value: &Value) -> EncodeResult<Cell> {
    let bad_field = || EncodeError::BadField {
        column: column.to_string(),
        value: value.to_string(),
    };

    match role {
        ColumnRole::Id => value.as_i64().map(Cell::Int).ok_or_else(bad_field),
        ColumnRole::Date => match value {
            Value::Null => Ok(Cell::Missing),
            Value::String(raw) => Ok(match parse_query_date(raw) {
                Some(date) => Cell::Date(date),
                None => Cell::Invalid(raw.clone()),
            }),
            _ => Err(bad_field()),
        },
        ColumnRole::Category | ColumnRole::Text => match value {
            Value::Null => Ok(Cell::Missing),
            Value::String(raw) => Ok(Cell::Text(raw.clone())),
            _ => Err(bad_field()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample_selection() -> Selection {
        let schema =
            TableSchema::from_headers(["Busbreakdown_ID", "Occurred_On", "Reason", "Boro"])
                .unwrap();
        Selection::new(
            schema,
            vec![
                Row {
                    ordinal: 0,
                    cells: vec![Cell::Int(1), date(2025, 2, 27), text("Mechanical"), text("Manhattan")],
                },
                Row {
                    ordinal: 1,
                    cells: vec![Cell::Int(3), date(2025, 2, 28), Cell::Missing, text("Brooklyn")],
                },
            ],
        )
    }

    #[test]
    fn test_encode_shape_and_date_form() {
        let encoded = encode_records(&sample_selection());
        let records = encoded.as_array().unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0]["id"], serde_json::json!(1));
        assert_eq!(records[0]["occurred_on"], serde_json::json!("2025-02-27"));
        assert_eq!(records[0]["reason"], serde_json::json!("Mechanical"));
        assert_eq!(records[1]["reason"], Value::Null);
    }

    #[test]
    fn test_decode_restores_cells() {
        let selection = sample_selection();
        let encoded = encode_records(&selection).to_string();
        let rows = decode_records(&encoded, selection.schema()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, selection.rows()[0].cells);
        assert_eq!(rows[1].cells[2], Cell::Missing);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let schema = sample_selection().schema().clone();
        let err = decode_records("{\"id\": 1}", &schema).unwrap_err();
        assert!(matches!(err, EncodeError::NotAnArray));
    }

    #[test]
    fn test_decode_rejects_unknown_field() {
        let schema = sample_selection().schema().clone();
        let payload = r#"[{"id": 1, "occurred_on": "2025-02-27", "reason": "Mechanical", "boro": "Bronx", "depot": "E"}]"#;
        let err = decode_records(payload, &schema).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownField(_)));
    }

    #[test]
    fn test_decode_rejects_non_integer_id() {
        let schema = sample_selection().schema().clone();
        let payload = r#"[{"id": "one", "occurred_on": "2025-02-27", "reason": "Mechanical", "boro": "Bronx"}]"#;
        let err = decode_records(payload, &schema).unwrap_err();
        assert!(matches!(err, EncodeError::BadField { .. }));
    }

    #[test]
    fn test_unparseable_date_decodes_as_invalid() {
        let schema = sample_selection().schema().clone();
        let payload = r#"[{"id": 1, "occurred_on": "late morning", "reason": "Mechanical", "boro": "Bronx"}]"#;
        let rows = decode_records(payload, &schema).unwrap();
        assert_eq!(rows[0].cells[1], Cell::Invalid("late morning".to_string()));
    }
}

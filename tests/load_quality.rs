//! Load Quality Tests
//!
//! Source files of varying quality pushed through the loader in both
//! parse modes: dirty timestamps, null tokens, malformed ids, and the
//! structural failures that abort a load outright.

use std::fs;

use tempfile::TempDir;

use delayline::schema::{Cell, ParseMode, SchemaError, DATE_COLUMN, ID_COLUMN, REASON_COLUMN};
use delayline::store::{load_path, LoadError};

fn write_dataset(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("delays.csv");
    fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Parse modes
// =============================================================================

#[test]
fn test_lenient_load_keeps_rows_with_bad_timestamps() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "\
Busbreakdown_ID,Occurred_On,Reason,Boro
1,02/27/2025 10:00:00 AM,Mechanical,Manhattan
2,late morning,Accident,Bronx
3,02/28/2025 08:15:00 AM,Weather,Brooklyn
",
    );

    let store = load_path(&path, ParseMode::Lenient).unwrap();
    assert_eq!(store.len(), 3);

    let (date_index, _) = store.schema().lookup(DATE_COLUMN).unwrap();
    let selection = store.select_all();
    assert_eq!(
        selection.rows()[1].cell(date_index),
        Some(&Cell::Invalid("late morning".to_string()))
    );

    // The quarantined cell matches nothing, so date counts skip that row
    let probe = Cell::Text("late morning".to_string());
    assert_eq!(store.count_where(DATE_COLUMN, &probe).unwrap(), 0);
}

#[test]
fn test_strict_load_rejects_bad_timestamps() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "\
Busbreakdown_ID,Occurred_On,Reason,Boro
1,02/27/2025 10:00:00 AM,Mechanical,Manhattan
2,late morning,Accident,Bronx
",
    );

    let err = load_path(&path, ParseMode::Strict).unwrap_err();
    match err {
        LoadError::Schema(SchemaError::InvalidTimestamp { row, value }) => {
            assert_eq!(row, 1);
            assert_eq!(value, "late morning");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_null_tokens_load_as_missing() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "\
Busbreakdown_ID,Occurred_On,Reason,Boro
1,NaN,Mechanical,Manhattan
2,02/27/2025 10:00:00 AM,nan,Bronx
3,02/28/2025 08:15:00 AM,None,NONE
4,03/01/2025 09:45:00 AM,,Queens
",
    );

    let store = load_path(&path, ParseMode::Strict).unwrap();
    let selection = store.select_all();
    let (date_index, _) = store.schema().lookup(DATE_COLUMN).unwrap();
    let (reason_index, _) = store.schema().lookup(REASON_COLUMN).unwrap();

    assert_eq!(selection.rows()[0].cell(date_index), Some(&Cell::Missing));
    assert_eq!(selection.rows()[1].cell(reason_index), Some(&Cell::Missing));
    assert_eq!(selection.rows()[2].cell(reason_index), Some(&Cell::Missing));
    assert_eq!(selection.rows()[3].cell(reason_index), Some(&Cell::Missing));

    // Absent is not the word "None"
    let probe = Cell::Text("None".to_string());
    assert_eq!(store.count_where(REASON_COLUMN, &probe).unwrap(), 0);
}

#[test]
fn test_every_loaded_row_has_an_integer_id() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "\
Busbreakdown_ID,Occurred_On,Reason,Boro
10,02/27/2025 10:00:00 AM,Mechanical,Manhattan
11,NaN,None,NONE
",
    );

    let store = load_path(&path, ParseMode::Lenient).unwrap();
    let (id_index, _) = store.schema().lookup(ID_COLUMN).unwrap();
    for row in store.select_all().iter() {
        assert!(matches!(row.cell(id_index), Some(Cell::Int(_))));
    }
}

#[test]
fn test_bad_id_fails_the_load_in_both_modes() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "\
Busbreakdown_ID,Occurred_On,Reason,Boro
abc,02/27/2025 10:00:00 AM,Mechanical,Manhattan
",
    );

    for mode in [ParseMode::Strict, ParseMode::Lenient] {
        let err = load_path(&path, mode).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::Schema(SchemaError::InvalidId { row: 0, .. })
            ),
            "mode {:?} gave {:?}",
            mode,
            err
        );
    }
}

// =============================================================================
// Structural failures
// =============================================================================

#[test]
fn test_header_only_dataset_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "Busbreakdown_ID,Occurred_On,Reason,Boro\n");

    let err = load_path(&path, ParseMode::Lenient).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}

#[test]
fn test_missing_required_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "\
Busbreakdown_ID,Occurred_On,Reason
1,02/27/2025 10:00:00 AM,Mechanical
",
    );

    let err = load_path(&path, ParseMode::Lenient).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Schema(SchemaError::MissingColumn("boro"))
    ));
}

#[test]
fn test_unreadable_path_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_file.csv");

    let err = load_path(&path, ParseMode::Lenient).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

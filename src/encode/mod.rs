//! Output encoding subsystem for delayline
//!
//! Two faces of the same selection: structured records (JSON array of
//! objects) and delimited text (CSV). Both render dates as ISO
//! `YYYY-MM-DD`, so decoding the record form and re-encoding as CSV
//! reproduces the direct CSV encoding byte for byte.

mod csv;
mod errors;
mod records;

pub use self::csv::encode_csv;
pub use errors::{EncodeError, EncodeResult};
pub use records::{decode_records, encode_records};

use crate::store::Selection;

/// Which encoding a response uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON array of record objects
    #[default]
    Records,
    /// Delimited text with a header row
    Csv,
}

impl OutputFormat {
    /// Parse the `format` query value.
    ///
    /// Absent means structured records; anything other than `json` or
    /// `csv` (case-insensitive) is rejected.
    pub fn parse(raw: Option<&str>) -> EncodeResult<Self> {
        match raw {
            None => Ok(OutputFormat::Records),
            Some(value) => match value.to_lowercase().as_str() {
                "json" => Ok(OutputFormat::Records),
                "csv" => Ok(OutputFormat::Csv),
                _ => Err(EncodeError::UnknownFormat(value.to_string())),
            },
        }
    }

    /// MIME type of the encoded body
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Records => "application/json",
            OutputFormat::Csv => "text/csv",
        }
    }
}

/// Encode a selection in the requested format
pub fn encode_selection(selection: &Selection, format: OutputFormat) -> EncodeResult<String> {
    match format {
        OutputFormat::Records => Ok(encode_records(selection).to_string()),
        OutputFormat::Csv => encode_csv(selection),
    }
}

//! Column registry for the incident table
//!
//! Known source headers map to canonical column names at load time:
//!
//! | source header     | canonical name | role     |
//! |-------------------|----------------|----------|
//! | `Busbreakdown_ID` | `id`           | Id       |
//! | `Occurred_On`     | `occurred_on`  | Date     |
//! | `Reason`          | `reason`       | Category |
//! | `Boro`            | `boro`         | Category |
//!
//! Unknown headers are carried verbatim as passthrough text columns. Every
//! column access goes through the registry; unregistered names fail with
//! `SchemaError::UnknownColumn` instead of panicking on a raw index.

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Canonical name of the identifier column
pub const ID_COLUMN: &str = "id";
/// Canonical name of the incident date column
pub const DATE_COLUMN: &str = "occurred_on";
/// Canonical name of the delay reason column
pub const REASON_COLUMN: &str = "reason";
/// Canonical name of the borough column
pub const BORO_COLUMN: &str = "boro";

/// What a column holds, and therefore how its cells normalize and how
/// filter probes against it parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Required 64-bit integer identifier
    Id,
    /// Timestamp column truncated to a calendar date
    Date,
    /// Nullable free-text category (reason, boro)
    Category,
    /// Passthrough text carried verbatim
    Text,
}

impl ColumnRole {
    /// Returns the role name for error messages
    pub fn role_name(&self) -> &'static str {
        match self {
            ColumnRole::Id => "id",
            ColumnRole::Date => "date",
            ColumnRole::Category => "category",
            ColumnRole::Text => "text",
        }
    }
}

/// A single registered column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Canonical column name
    pub name: String,
    /// Column role
    pub role: ColumnRole,
}

impl ColumnDef {
    /// Create a new column definition
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// The column registry for one loaded table.
///
/// Column order is the source header order after canonical renaming; the
/// delimited encoding reuses it as the output header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Build the registry from a source header row.
    ///
    /// Fails when a required column is absent or two headers collapse onto
    /// the same canonical name.
    pub fn from_headers<I, S>(headers: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: Vec<ColumnDef> = Vec::new();

        for header in headers {
            let header = header.as_ref();
            let def = match header.to_lowercase().as_str() {
                "busbreakdown_id" | "id" => ColumnDef::new(ID_COLUMN, ColumnRole::Id),
                "occurred_on" => ColumnDef::new(DATE_COLUMN, ColumnRole::Date),
                "reason" => ColumnDef::new(REASON_COLUMN, ColumnRole::Category),
                "boro" => ColumnDef::new(BORO_COLUMN, ColumnRole::Category),
                _ => ColumnDef::new(header, ColumnRole::Text),
            };

            if columns.iter().any(|c| c.name == def.name) {
                return Err(SchemaError::DuplicateColumn(def.name));
            }

            columns.push(def);
        }

        for required in [ID_COLUMN, DATE_COLUMN, REASON_COLUMN, BORO_COLUMN] {
            if !columns.iter().any(|c| c.name == required) {
                return Err(SchemaError::MissingColumn(required));
            }
        }

        Ok(Self { columns })
    }

    /// Returns the registered columns in table-definition order
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Number of registered columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no columns are registered
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolve a canonical column name to its index and definition
    pub fn lookup(&self, name: &str) -> SchemaResult<(usize, &ColumnDef)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.name == name)
            .ok_or_else(|| SchemaError::UnknownColumn(name.to_string()))
    }

    /// Canonical column names in table-definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

//! Record store subsystem for delayline
//!
//! Turns the source CSV into the normalized in-memory table and answers
//! exact-match lookups over it:
//!
//! - `loader`: CSV ingestion through the column registry
//! - `table`: the `RecordStore` and the `Selection` handed to queries
//! - `provider`: reload-policy layer between loader and engine

mod errors;
mod loader;
mod provider;
mod table;

pub use errors::{LoadError, LoadResult};
pub use loader::{load_path, load_reader};
pub use provider::{DatasetProvider, ReloadPolicy};
pub use table::{RecordStore, Row, Selection};

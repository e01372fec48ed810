//! CLI command implementations
//!
//! Three commands over one JSON config file: `serve` boots the HTTP
//! server, `load` reads the dataset once and reports on it, `query` runs
//! one engine query and prints the encoded result.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::encode::{encode_selection, OutputFormat};
use crate::http_server::{HttpConfig, HttpServer};
use crate::observability::Logger;
use crate::query::QueryEngine;
use crate::schema::{Cell, ParseMode, DATE_COLUMN};
use crate::store::{load_path, DatasetProvider, RecordStore, ReloadPolicy};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_body, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the incident dataset CSV (required)
    pub dataset_path: String,

    /// Timestamp parse mode (optional, default "lenient")
    #[serde(default)]
    pub parse_mode: ParseMode,

    /// Dataset reload policy (optional, default "per_request")
    #[serde(default)]
    pub reload: ReloadPolicy,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.dataset_path.is_empty() {
            return Err(CliError::config_error("dataset_path must not be empty"));
        }

        Ok(())
    }

    /// Get dataset path as Path
    pub fn dataset_path(&self) -> &Path {
        Path::new(&self.dataset_path)
    }

    /// Build a dataset provider from this configuration
    pub fn provider(&self) -> DatasetProvider {
        DatasetProvider::new(self.dataset_path(), self.parse_mode, self.reload)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Load { config } => load(&config),
        Command::Query {
            config,
            column,
            value,
            format,
        } => query(&config, column, value, format),
    }
}

/// Start the HTTP server
///
/// With the startup reload policy the dataset is loaded once here, before
/// the listener opens; the per-request policy defers every load to the
/// handlers.
pub fn serve(config_path: &Path, port: u16) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let provider = Arc::new(config.provider());

    if matches!(provider.policy(), ReloadPolicy::Startup) {
        let store = provider.reload().map_err(|e| {
            let detail = e.to_string();
            Logger::error("DATASET_LOAD_FAILED", &[("error", &detail)]);
            CliError::load_failed(detail)
        })?;
        log_loaded(&config, &store);
    }

    let engine = QueryEngine::new(provider);
    let server = HttpServer::new(HttpConfig::with_port(port), engine);

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Load the dataset once and report on it
///
/// Reports row and column counts plus the number of rows whose timestamp
/// failed to parse (only possible under the lenient mode).
pub fn load(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let store = load_path(config.dataset_path(), config.parse_mode).map_err(|e| {
        let detail = e.to_string();
        Logger::error("DATASET_LOAD_FAILED", &[("error", &detail)]);
        CliError::load_failed(detail)
    })?;

    log_loaded(&config, &store);
    let dirty = dirty_dates(&store)?;
    if dirty > 0 {
        let dirty_text = dirty.to_string();
        Logger::warn("DATASET_DIRTY_DATES", &[("rows", &dirty_text)]);
    }

    write_response(json!({
        "path": config.dataset_path,
        "mode": config.parse_mode.as_str(),
        "rows": store.len(),
        "columns": store.schema().len(),
        "dirty_dates": dirty,
    }))?;

    Ok(())
}

/// Execute a single query and exit
///
/// An empty result prints as an empty encoding; the 404-style empty
/// signal belongs to the HTTP boundary, not to this command.
pub fn query(
    config_path: &Path,
    column: Option<String>,
    value: Option<String>,
    format: Option<String>,
) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let engine = QueryEngine::new(Arc::new(config.provider()));

    let filter = match (column.as_deref(), value.as_deref()) {
        (Some(column), Some(value)) => Some((column, value)),
        (None, None) => None,
        _ => {
            return Err(CliError::query_failed(
                "--column and --value must be supplied together",
            ))
        }
    };

    let format = OutputFormat::parse(format.as_deref())
        .map_err(|e| CliError::query_failed(e.to_string()))?;

    let selection = engine
        .select_by_arbitrary(filter)
        .map_err(|e| CliError::query_failed(e.to_string()))?;

    let body = encode_selection(&selection, format)
        .map_err(|e| CliError::query_failed(e.to_string()))?;

    write_body(&body)?;

    Ok(())
}

fn log_loaded(config: &Config, store: &RecordStore) {
    let rows = store.len().to_string();
    Logger::info(
        "DATASET_LOADED",
        &[
            ("path", config.dataset_path.as_str()),
            ("mode", config.parse_mode.as_str()),
            ("rows", &rows),
        ],
    );
}

/// Count rows whose timestamp cell survived the load unparsed
fn dirty_dates(store: &RecordStore) -> CliResult<usize> {
    let (date_index, _) = store
        .schema()
        .lookup(DATE_COLUMN)
        .map_err(|e| CliError::load_failed(e.to_string()))?;

    let count = store
        .select_all()
        .iter()
        .filter(|row| matches!(row.cell(date_index), Some(Cell::Invalid(_))))
        .count();

    Ok(count)
}

//! CLI module for delayline
//!
//! Provides command-line interface for:
//! - serve: Boot the HTTP server
//! - load: One-shot dataset load report
//! - query: One-shot query execution

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{load, query, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_body, write_response};

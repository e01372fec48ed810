//! CLI argument definitions using clap
//!
//! Commands:
//! - delayline serve --config <path> [--port <port>]
//! - delayline load --config <path>
//! - delayline query --config <path> [--column <name> --value <value>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// delayline - an HTTP query service over transportation delay records
#[derive(Parser, Debug)]
#[command(name = "delayline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./delayline.json")]
        config: PathBuf,

        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },

    /// Load the dataset once and report on it
    Load {
        /// Path to configuration file
        #[arg(long, default_value = "./delayline.json")]
        config: PathBuf,
    },

    /// Execute a single query and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./delayline.json")]
        config: PathBuf,

        /// Column to filter on; omit together with --value for the full table
        #[arg(long)]
        column: Option<String>,

        /// Value the column must equal
        #[arg(long)]
        value: Option<String>,

        /// Output format: json or csv
        #[arg(long)]
        format: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

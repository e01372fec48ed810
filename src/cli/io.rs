//! Output handling for the one-shot CLI commands
//!
//! Reports go to stdout as a single JSON object; encoded query bodies go
//! out verbatim (they may be CSV). UTF-8 only.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success report to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an encoded body to stdout unchanged
pub fn write_body(body: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", body)?;
    stdout.flush()?;

    Ok(())
}

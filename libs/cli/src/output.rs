//! Shared result printing.

use serde::Serialize;

use crate::OutputFormat;

/// Prints a serializable result as pretty JSON.
///
/// Text output is written by each command itself; this only handles the
/// machine-readable path.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("Failed to serialize output: {err}"),
        }
    }
}

//! Output formatting utilities

use std::io::IsTerminal;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
///
/// Lists go out as CSV when stdout is piped, everything else as a table.
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list && !std::io::stdout().is_terminal() {
                OutputFormat::Csv
            } else {
                OutputFormat::Table
            }
        }
        other => other,
    }
}

/// Tracing filter directive for a `-v` count
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

//! Output module for reporting crawl results
//!
//! This module handles:
//! - Writing the sorted page table as CSV or to the console
//! - Computing and printing the end-of-run summary

mod console;
mod csv_output;
pub mod stats;
mod traits;

pub use console::ConsoleOutputHandler;
pub use csv_output::{write_csv, CsvOutputHandler};
pub use stats::{format_statistics, load_statistics, print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult, ReportTable};

use crate::config::OutputConfig;
use crate::state::RunState;
use std::path::PathBuf;

/// Writes the report for a finished run
///
/// With a file template the table goes to a CSV file named after the site host;
/// without one it is printed to the console. Nothing is written when no pages were
/// recorded.
///
/// # Returns
///
/// * `Ok(Some(path))` - The CSV file that was written
/// * `Ok(None)` - Nothing recorded, or the report went to the console
/// * `Err(OutputError)` - The file could not be written
pub fn write_report(state: &RunState, config: &OutputConfig) -> OutputResult<Option<PathBuf>> {
    let table = ReportTable::from_state(state);
    if table.is_empty() {
        tracing::info!("No pages recorded, skipping report");
        return Ok(None);
    }

    match config.output_path(&state.site().domain) {
        Some(path) => {
            CsvOutputHandler::new(&path).write_report(&table)?;
            Ok(Some(path))
        }
        None => {
            ConsoleOutputHandler::stdout().write_report(&table)?;
            Ok(None)
        }
    }
}

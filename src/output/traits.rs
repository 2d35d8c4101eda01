//! Output handler traits and types
//!
//! This module defines the trait interface for report writers and the tabular
//! form of a finished run they all consume.

use crate::state::RunState;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A finished run laid out as rows and columns
///
/// The first column is always the URL. Rows are sorted ascending by URL. A cell is
/// `None` when the record has no value for that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ReportTable {
    /// Builds the table from every record of the run
    pub fn from_state(state: &RunState) -> Self {
        let header: Vec<String> = state.header().into_iter().map(str::to_string).collect();

        let rows = state
            .sorted_records()
            .into_iter()
            .map(|(url, record)| {
                std::iter::once(Some(url.to_string()))
                    .chain(
                        header
                            .iter()
                            .skip(1)
                            .map(|column| record.field(column).map(str::to_string)),
                    )
                    .collect()
            })
            .collect();

        Self { header, rows }
    }

    /// Returns true if the run recorded no pages
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for report writers
///
/// A handler receives the complete table once, after the crawl has finished.
pub trait OutputHandler {
    /// Writes the report
    ///
    /// # Arguments
    ///
    /// * `table` - The sorted rows of the finished run
    fn write_report(&mut self, table: &ReportTable) -> OutputResult<()>;
}

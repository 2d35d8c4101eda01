//! CSV report writer

use crate::output::traits::{OutputHandler, OutputResult, ReportTable};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Writes the report as a CSV file
///
/// Absent values become empty cells.
pub struct CsvOutputHandler {
    path: PathBuf,
}

impl CsvOutputHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for CsvOutputHandler {
    fn write_report(&mut self, table: &ReportTable) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        write_csv(file, table)?;
        tracing::info!("Wrote {} rows to {}", table.rows.len(), self.path.display());
        Ok(())
    }
}

/// Serializes a table as CSV into any writer
pub fn write_csv<W: Write>(writer: W, table: &ReportTable) -> OutputResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.header)?;

    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    writer.flush()?;
    Ok(())
}

//! Console report writer, used when no output file is configured

use crate::output::traits::{OutputHandler, OutputResult, ReportTable};
use std::io::Write;

/// Prints the header as a list, then one list per row
///
/// Values are quoted; absent values print as `None`.
pub struct ConsoleOutputHandler<W: Write> {
    out: W,
}

impl ConsoleOutputHandler<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleOutputHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputHandler for ConsoleOutputHandler<W> {
    fn write_report(&mut self, table: &ReportTable) -> OutputResult<()> {
        let header: Vec<Option<&str>> = table.header.iter().map(|h| Some(h.as_str())).collect();
        writeln!(self.out, "{}", format_list(&header))?;

        for row in &table.rows {
            let cells: Vec<Option<&str>> = row.iter().map(|c| c.as_deref()).collect();
            writeln!(self.out, "{}", format_list(&cells))?;
        }

        self.out.flush()?;
        Ok(())
    }
}

fn format_list(cells: &[Option<&str>]) -> String {
    let items: Vec<String> = cells
        .iter()
        .map(|cell| match cell {
            Some(value) => format!("{:?}", value),
            None => "None".to_string(),
        })
        .collect();
    format!("[{}]", items.join(", "))
}

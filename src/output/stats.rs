//! Run statistics and the end-of-run summary
//!
//! This module extracts the figures printed after a crawl: how many pages were
//! recorded, how many of them were media, and which URLs failed.

use crate::crawler::terminal_counts;
use crate::state::{ErrorEntry, PageState, RunState};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Number of recorded URLs, HTML and media
    pub total_pages: usize,

    /// Number of URLs recorded as media
    pub media_files: usize,

    /// Count of visited URLs by terminal state
    pub pages_by_state: Vec<(PageState, usize)>,

    /// Every failed URL with its reason, in the order they failed
    pub errors: Vec<ErrorEntry>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStatistics {
    /// Wall-clock duration of the run, if it has finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

/// Collects statistics from a finished run
pub fn load_statistics(state: &RunState) -> CrawlStatistics {
    let pages_by_state = terminal_counts(state)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect();

    CrawlStatistics {
        total_pages: state.page_count(),
        media_files: state.media_urls().len(),
        pages_by_state,
        errors: state.errors().to_vec(),
        started_at: state.started_at(),
        finished_at: state.finished_at(),
    }
}

/// Renders the summary text
///
/// The error section only appears when at least one URL failed.
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total: {} pages", stats.total_pages);
    let _ = writeln!(out, "Media files: {}", stats.media_files);

    if !stats.pages_by_state.is_empty() {
        let _ = writeln!(out, "Pages by state:");
        for (state, count) in &stats.pages_by_state {
            let _ = writeln!(out, "  {}: {}", state, count);
        }
    }

    if !stats.errors.is_empty() {
        let _ = writeln!(out, "Errors: {}", stats.errors.len());
        for entry in &stats.errors {
            let _ = writeln!(out, "  {} {}", entry.url, entry.reason);
        }
    }

    if let Some(seconds) = stats.duration_seconds() {
        let _ = writeln!(
            out,
            "Started {} ({:.1}s)",
            stats.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            seconds
        );
    }

    out
}

/// Prints the summary to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}

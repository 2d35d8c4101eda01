//! State module for tracking crawl progress
//!
//! This module provides the state of a single crawl run.
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual URLs (fetching, html, media, errors)
//! - `VisitedSet`: Deduplicates URLs, one dispatch per URL per run
//! - `RunState`: Owns records, errors, media URLs, visited set and the output header

mod page_state;
mod run_state;

// Re-export main types
pub use page_state::PageState;
pub use run_state::{
    ErrorEntry, ErrorKind, PageMeta, PageRecord, RunState, VisitedSet, MEDIA_TITLE, PAGE_FIELDS,
};

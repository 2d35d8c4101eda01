//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching without redirects
//! - HTML analysis and link extraction
//! - Frontier management and request pacing
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, terminal_counts, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use parser::{analyze, parse_html, PageAnalysis};
pub use scheduler::{CrawlTarget, Scheduler};

//! Scheduler for managing the crawl frontier and request pacing
//!
//! This module handles:
//! - The depth-first frontier of URLs waiting to be fetched
//! - The fixed delay inserted before every request after the first

use std::time::Duration;

/// A URL waiting to be fetched, with the depth it was discovered at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlTarget {
    /// Normalized absolute URL
    pub url: String,

    /// Number of links followed from the seed to reach this URL
    pub depth: u32,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// Target for a link found on this page
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self::new(url, self.depth + 1)
    }
}

/// Scheduler manages the frontier and pacing
///
/// The frontier is a LIFO stack. Children of a page are pushed in reverse document order,
/// so they pop in document order and each child's own subtree is exhausted before its
/// next sibling comes up. This is the order a recursive depth-first walk would produce.
#[derive(Debug)]
pub struct Scheduler {
    /// Targets waiting to be fetched; the last element is fetched next
    frontier: Vec<CrawlTarget>,

    /// Pause inserted before each request except the first
    delay: Duration,

    /// Number of targets handed out for fetching so far
    dispatched: u64,
}

impl Scheduler {
    /// Creates a scheduler whose frontier holds only the seed
    pub fn new(seed: CrawlTarget, delay: Duration) -> Self {
        Self {
            frontier: vec![seed],
            delay,
            dispatched: 0,
        }
    }

    /// Adds the links discovered on one page, given in document order
    pub fn push_children(&mut self, children: Vec<CrawlTarget>) {
        self.frontier.extend(children.into_iter().rev());
    }

    /// Takes the next target off the frontier
    pub fn next_target(&mut self) -> Option<CrawlTarget> {
        self.frontier.pop()
    }

    /// Waits for the inter-request delay, then counts one dispatch
    ///
    /// The first dispatch (the seed) never waits.
    pub async fn wait_turn(&mut self) {
        if self.dispatched > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.dispatched += 1;
    }

    /// Returns the number of targets dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }
}

//! Run state: everything a crawl accumulates between the seed and the report
//!
//! A `RunState` is created when the crawl starts, owned and mutated by the coordinator
//! while pages are processed, and handed to the output module when the frontier is
//! exhausted. Nothing here outlives a run.

use super::PageState;
use crate::url::SiteRoot;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Title stored for resources that are not HTML
pub const MEDIA_TITLE: &str = "mediafile";

/// Field names of an HTML page record, in output column order
pub const PAGE_FIELDS: [&str; 4] = ["title", "description", "keywords", "h1"];

/// Metadata extracted from an HTML page
///
/// Each field is `None` when the page lacks the element, and trimmed otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Text of the `<title>` element
    pub title: Option<String>,

    /// `content` of `<meta name="description">`
    pub description: Option<String>,

    /// `content` of `<meta name="keywords">`
    pub keywords: Option<String>,

    /// Text of the first `<h1>` element
    pub heading: Option<String>,
}

/// One recorded URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRecord {
    /// An HTML page with its extracted metadata
    Html(PageMeta),

    /// A non-HTML resource
    Media {
        /// The Content-Type header the server sent
        content_type: String,
    },
}

impl PageRecord {
    /// Names of the fields this record carries, in output order
    pub fn field_names(&self) -> &'static [&'static str] {
        &PAGE_FIELDS
    }

    /// Looks up a field by its column name
    ///
    /// Media records report [`MEDIA_TITLE`] as their title and the content type as their
    /// description; their other fields are absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Html(meta) => match name {
                "title" => meta.title.as_deref(),
                "description" => meta.description.as_deref(),
                "keywords" => meta.keywords.as_deref(),
                "h1" => meta.heading.as_deref(),
                _ => None,
            },
            Self::Media { content_type } => match name {
                "title" => Some(MEDIA_TITLE),
                "description" => Some(content_type.as_str()),
                _ => None,
            },
        }
    }

    /// Returns true for media records
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Media { .. })
    }
}

/// Why a URL ended up in the error list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server answered with a non-200 status
    Http(u16),

    /// No response was received
    Transport,
}

/// A URL that could not be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub url: String,
    pub kind: ErrorKind,
    pub reason: String,
}

impl ErrorEntry {
    /// Error entry for a non-200 response
    pub fn http(url: impl Into<String>, status_code: u16) -> Self {
        Self {
            url: url.into(),
            kind: ErrorKind::Http(status_code),
            reason: format!("HTTP {}", status_code),
        }
    }

    /// Error entry for a request that never got a response
    pub fn transport(url: impl Into<String>, message: &str) -> Self {
        Self {
            url: url.into(),
            kind: ErrorKind::Transport,
            reason: format!("transport: {}", message),
        }
    }

    /// The page state this error leaves its URL in
    pub fn state(&self) -> PageState {
        match self.kind {
            ErrorKind::Http(_) => PageState::HttpError,
            ErrorKind::Transport => PageState::TransportError,
        }
    }
}

/// Normalized URLs that have been dispatched, with the state each one reached
///
/// This is the only deduplication authority of a run.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    states: HashMap<String, PageState>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks and marks a URL in one step
    ///
    /// Returns `true` if the URL was not visited before; it is then in the `Fetching`
    /// state. Returns `false` and changes nothing otherwise.
    pub fn try_mark(&mut self, url: &str) -> bool {
        if self.states.contains_key(url) {
            return false;
        }
        self.states.insert(url.to_string(), PageState::Fetching);
        true
    }

    /// Moves a URL to its terminal state, marking it first if needed
    pub fn complete(&mut self, url: &str, state: PageState) {
        self.states.insert(url.to_string(), state);
    }

    /// Returns true if the URL has been dispatched
    pub fn contains(&self, url: &str) -> bool {
        self.states.contains_key(url)
    }

    /// Returns the state a URL reached, if it was dispatched
    pub fn state_of(&self, url: &str) -> Option<PageState> {
        self.states.get(url).copied()
    }

    /// Counts visited URLs that ended in `state`
    pub fn count_in_state(&self, state: PageState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Aggregate state of one crawl run
#[derive(Debug, Clone)]
pub struct RunState {
    site: SiteRoot,
    records: HashMap<String, PageRecord>,
    errors: Vec<ErrorEntry>,
    media: Vec<String>,
    visited: VisitedSet,
    columns: Option<Vec<&'static str>>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl RunState {
    /// Creates the state for a run over `site`
    pub fn new(site: SiteRoot) -> Self {
        Self {
            site,
            records: HashMap::new(),
            errors: Vec::new(),
            media: Vec::new(),
            visited: VisitedSet::new(),
            columns: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// The site this run crawls
    pub fn site(&self) -> &SiteRoot {
        &self.site
    }

    /// Claims a URL for fetching
    ///
    /// Returns `false` if the URL was already dispatched in this run.
    pub fn begin_visit(&mut self, url: &str) -> bool {
        self.visited.try_mark(url)
    }

    /// Returns true if the URL was already dispatched
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Stores the record for a URL and moves it to its terminal state
    ///
    /// The first HTML record fixes the column order for the rest of the run.
    pub fn record_page(&mut self, url: &str, record: PageRecord) {
        let state = if record.is_media() {
            self.media.push(url.to_string());
            PageState::Media
        } else {
            if self.columns.is_none() {
                self.columns = Some(record.field_names().to_vec());
            }
            PageState::Html
        };

        self.visited.complete(url, state);
        self.records.insert(url.to_string(), record);
    }

    /// Appends an error entry and moves its URL to the matching terminal state
    pub fn record_error(&mut self, entry: ErrorEntry) {
        self.visited.complete(&entry.url, entry.state());
        self.errors.push(entry);
    }

    /// Stamps the end of the run
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the record stored for a URL
    pub fn record(&self, url: &str) -> Option<&PageRecord> {
        self.records.get(url)
    }

    /// All records, sorted ascending by URL
    pub fn sorted_records(&self) -> Vec<(&str, &PageRecord)> {
        let mut rows: Vec<_> = self
            .records
            .iter()
            .map(|(url, record)| (url.as_str(), record))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Output header: `url` followed by the fixed field order
    ///
    /// If no HTML page was recorded the default field order is used.
    pub fn header(&self) -> Vec<&'static str> {
        let fields = self.columns.as_deref().unwrap_or(&PAGE_FIELDS);
        std::iter::once("url").chain(fields.iter().copied()).collect()
    }

    /// Returns true once the first HTML page has fixed the column order
    pub fn has_fixed_header(&self) -> bool {
        self.columns.is_some()
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    /// URLs recorded as media, in the order they were found
    pub fn media_urls(&self) -> &[String] {
        &self.media
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Number of recorded URLs (HTML and media)
    pub fn page_count(&self) -> usize {
        self.records.len()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }
}

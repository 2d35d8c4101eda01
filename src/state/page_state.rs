/// Page state definitions for tracking crawl progress
///
/// This module defines all possible states a URL can be in during the crawl process.
/// A discovered URL that is still waiting on the frontier has no state yet; it only
/// enters the visited set once it is claimed for fetching.
use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active State =====
    /// URL has been claimed and is being fetched
    Fetching,

    // ===== Terminal Success States =====
    /// HTML page fetched and analyzed
    Html,

    /// Non-HTML resource, recorded as a media file
    Media,

    // ===== Terminal Error States =====
    /// Server answered with a status other than 200
    HttpError,

    /// Request never produced a response (DNS, connection, TLS, timeout, body read)
    TransportError,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state (URL may still be processed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Fetching)
    }

    /// Returns true if this state produced a page record
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Html | Self::Media)
    }

    /// Returns true if this state produced an error entry
    pub fn is_error(&self) -> bool {
        matches!(self, Self::HttpError | Self::TransportError)
    }

    /// Short lowercase label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Html => "html",
            Self::Media => "media",
            Self::HttpError => "http_error",
            Self::TransportError => "transport_error",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Fetching,
            Self::Html,
            Self::Media,
            Self::HttpError,
            Self::TransportError,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! URL handling module for Site-Sweep
//!
//! This module provides href normalization, network-location extraction and the
//! in-scope / out-of-scope decision for discovered links.

mod domain;
mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, href_scheme};
pub use normalize::normalize;

/// The scheme and network location every crawled URL is measured against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot {
    /// Scheme including the separator, e.g. `https://`
    pub scheme: String,

    /// Lowercase network location, e.g. `example.com` or `127.0.0.1:8080`
    pub domain: String,
}

impl SiteRoot {
    /// Builds the site root from the seed URL
    ///
    /// # Errors
    ///
    /// * `UrlError::Parse` - The seed is not an absolute URL
    /// * `UrlError::InvalidScheme` - The seed is not http or https
    /// * `UrlError::MissingDomain` - The seed has no host
    pub fn from_seed(seed: &str) -> UrlResult<Self> {
        let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }

        let domain = extract_domain(url.as_str()).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            scheme: format!("{}://", url.scheme()),
            domain,
        })
    }

    /// Returns `scheme://domain` without a trailing slash
    pub fn root_url(&self) -> String {
        format!("{}{}", self.scheme, self.domain)
    }
}

/// Whether a normalized URL belongs to the crawled site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Same network location as the site, should be crawled
    InScope,
    /// Different network location, skipped without being recorded
    OutOfScope,
}

impl Scope {
    /// Returns true if the URL should be crawled
    pub fn should_crawl(&self) -> bool {
        matches!(self, Self::InScope)
    }
}

/// Classifies a normalized URL against the site's network location
///
/// A URL without any network location can only come from malformed input, since the
/// normalizer turns every relative href into an absolute one. Such URLs are treated as
/// in scope so pages are never lost silently.
///
/// # Examples
///
/// ```
/// use site_sweep::url::{classify, Scope};
///
/// assert_eq!(classify("https://example.com/about", "example.com"), Scope::InScope);
/// assert_eq!(classify("https://other.org/x", "example.com"), Scope::OutOfScope);
/// ```
pub fn classify(normalized_url: &str, site_domain: &str) -> Scope {
    match extract_domain(normalized_url) {
        None => Scope::InScope,
        Some(domain) if domain.eq_ignore_ascii_case(site_domain) => Scope::InScope,
        Some(_) => Scope::OutOfScope,
    }
}

/// Returns true if an href may lead to a crawlable page
///
/// Hrefs with a scheme other than http or https (`javascript:`, `tel:`, `data:`,
/// `mailto:`, ...) are dropped before normalization.
pub fn is_followable(href: &str) -> bool {
    match href_scheme(href.trim()) {
        Some(scheme) => scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_root_from_seed() {
        let site = SiteRoot::from_seed("https://Example.com/").unwrap();
        assert_eq!(site.scheme, "https://");
        assert_eq!(site.domain, "example.com");
        assert_eq!(site.root_url(), "https://example.com");
    }

    #[test]
    fn test_site_root_keeps_port() {
        let site = SiteRoot::from_seed("http://127.0.0.1:4321").unwrap();
        assert_eq!(site.root_url(), "http://127.0.0.1:4321");
    }

    #[test]
    fn test_site_root_rejects_bad_seeds() {
        assert!(matches!(
            SiteRoot::from_seed("example.com"),
            Err(UrlError::Parse(_))
        ));
        assert!(matches!(
            SiteRoot::from_seed("ftp://example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_classify_same_domain() {
        assert_eq!(
            classify("https://example.com/about", "example.com"),
            Scope::InScope
        );
        assert_eq!(
            classify("http://EXAMPLE.com/about", "example.com"),
            Scope::InScope
        );
    }

    #[test]
    fn test_classify_foreign_domain() {
        assert_eq!(
            classify("https://other.org/x", "example.com"),
            Scope::OutOfScope
        );
        assert_eq!(
            classify("https://sub.example.com/x", "example.com"),
            Scope::OutOfScope
        );
        assert_eq!(
            classify("http://example.com:8080/x", "example.com"),
            Scope::OutOfScope
        );
    }

    #[test]
    fn test_classify_missing_domain_is_in_scope() {
        assert_eq!(classify("not-a-url", "example.com"), Scope::InScope);
    }

    #[test]
    fn test_should_crawl() {
        assert!(Scope::InScope.should_crawl());
        assert!(!Scope::OutOfScope.should_crawl());
    }

    #[test]
    fn test_is_followable() {
        assert!(is_followable("/about"));
        assert!(is_followable("page"));
        assert!(is_followable("https://example.com"));
        assert!(is_followable("HTTP://example.com"));
        assert!(!is_followable("javascript:void(0)"));
        assert!(!is_followable("tel:+1234567890"));
        assert!(!is_followable("data:text/html,hi"));
        assert!(!is_followable("mailto:someone@example.com"));
    }
}

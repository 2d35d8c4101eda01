use std::borrow::Cow;
use url::Url;

/// Extracts the network location (host and optional port) from a raw URL string
///
/// The host is lowercased. A non-default port is kept, so `127.0.0.1:8080` and
/// `127.0.0.1:9090` are different sites. Scheme-relative references (`//host/path`)
/// carry a network location too.
///
/// # Arguments
///
/// * `raw` - The URL or href to inspect
///
/// # Returns
///
/// * `Some(String)` - The lowercase network location
/// * `None` - If the string has no network location (relative path, `javascript:`, ...)
///
/// # Examples
///
/// ```
/// use site_sweep::url::extract_domain;
///
/// assert_eq!(extract_domain("https://Example.COM/path"), Some("example.com".to_string()));
/// assert_eq!(extract_domain("http://localhost:8080/a"), Some("localhost:8080".to_string()));
/// assert_eq!(extract_domain("/about"), None);
/// ```
pub fn extract_domain(raw: &str) -> Option<String> {
    let candidate = if raw.starts_with("//") {
        Cow::Owned(format!("http:{}", raw))
    } else {
        Cow::Borrowed(raw)
    };

    let url = Url::parse(&candidate).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?.to_lowercase();

    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns the scheme of an href if it has one
///
/// Only a leading `scheme:` made of ASCII letters, digits, `+`, `-` and `.` counts, and
/// the colon must come before any `/`, `?` or `#`.
pub fn href_scheme(href: &str) -> Option<&str> {
    let colon = href.find(':')?;
    let scheme = &href[..colon];

    let mut chars = scheme.chars();
    let first_is_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if first_is_alpha && rest_valid {
        Some(scheme)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        assert_eq!(
            extract_domain("https://example.com/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_subdomain() {
        assert_eq!(
            extract_domain("https://blog.example.com/post"),
            Some("blog.example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port() {
        assert_eq!(
            extract_domain("http://127.0.0.1:8080/page"),
            Some("127.0.0.1:8080".to_string())
        );
    }

    #[test]
    fn test_default_port_dropped() {
        assert_eq!(
            extract_domain("http://example.com:80/page"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_uppercase_converted_to_lowercase() {
        assert_eq!(
            extract_domain("https://EXAMPLE.COM/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_scheme_relative() {
        assert_eq!(
            extract_domain("//cdn.example.com/lib.js"),
            Some("cdn.example.com".to_string())
        );
    }

    #[test]
    fn test_no_domain() {
        assert_eq!(extract_domain("/about"), None);
        assert_eq!(extract_domain("about/team"), None);
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("javascript:void(0)"), None);
        assert_eq!(extract_domain("mailto:someone@example.com"), None);
    }

    #[test]
    fn test_href_scheme() {
        assert_eq!(href_scheme("https://example.com"), Some("https"));
        assert_eq!(href_scheme("javascript:void(0)"), Some("javascript"));
        assert_eq!(href_scheme("tel:+123"), Some("tel"));
        assert_eq!(href_scheme("/path:with-colon"), None);
        assert_eq!(href_scheme("page?a=b:c"), None);
        assert_eq!(href_scheme("relative/page"), None);
        assert_eq!(href_scheme(":nothing"), None);
    }
}

use super::domain::{extract_domain, href_scheme};
use super::SiteRoot;

/// Normalizes a raw href found on `page_url` into an absolute, comparable URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Cut the fragment (`#...`), the query string (`?...`) and anything from `mailto:` on
/// 3. Remove trailing slashes
/// 4. Resolve the result:
///    - Carries a network location → absolute; scheme and host are lowercased and a
///      default port dropped, the path is kept as-is (a scheme-relative `//host/path`
///      takes the site scheme)
///    - Empty or starts with `/` → site-absolute, prefixed with the site root
///    - Anything else → relative to `page_url` (see [`resolve_relative`])
///
/// The result depends only on the arguments, so re-discovering the same href on the same
/// page always yields the same URL.
///
/// # Arguments
///
/// * `href` - The raw `href` attribute value
/// * `page_url` - The normalized URL of the page the href was found on
/// * `site` - The scheme and domain of the crawled site
///
/// # Examples
///
/// ```
/// use site_sweep::url::{normalize, SiteRoot};
///
/// let site = SiteRoot::from_seed("https://example.com").unwrap();
/// let page = "https://example.com/a/b";
///
/// assert_eq!(normalize("/about/", page, &site), "https://example.com/about");
/// assert_eq!(normalize("../c", page, &site), "https://example.com/c");
/// assert_eq!(normalize("d?x=1#top", page, &site), "https://example.com/a/b/d");
/// ```
pub fn normalize(href: &str, page_url: &str, site: &SiteRoot) -> String {
    let stripped = strip_href(href);

    if let Some(domain) = extract_domain(stripped) {
        return canonical_absolute(stripped, &domain, site);
    }

    if stripped.is_empty() || stripped.starts_with('/') {
        return format!("{}{}", site.root_url(), stripped);
    }

    resolve_relative(stripped, page_url)
}

/// Rebuilds an absolute href as `scheme://domain/path`
///
/// `domain` is the already-lowercased network location of `href`, so two spellings of
/// the same address (`https://EXAMPLE.com/a`, `https://example.com:443/a`) map to the
/// key a site-absolute `/a` produces.
fn canonical_absolute(href: &str, domain: &str, site: &SiteRoot) -> String {
    let (scheme, rest) = match href.strip_prefix("//") {
        Some(rest) => (site.scheme.clone(), rest),
        None => match href_scheme(href) {
            Some(scheme) => (
                format!("{}://", scheme.to_ascii_lowercase()),
                href[scheme.len() + 1..].trim_start_matches('/'),
            ),
            None => return href.to_string(),
        },
    };

    let path = rest.find('/').map_or("", |index| &rest[index..]);
    format!("{}{}{}", scheme, domain, path)
}

/// Removes the parts of an href that never distinguish one crawled page from another
fn strip_href(href: &str) -> &str {
    let href = href.trim();
    let href = cut_at(href, "#");
    let href = cut_at(href, "?");
    let href = cut_at(href, "mailto:");
    href.trim_end_matches('/')
}

/// Returns everything before the first occurrence of `pattern`
fn cut_at<'a>(value: &'a str, pattern: &str) -> &'a str {
    match value.find(pattern) {
        Some(index) => &value[..index],
        None => value,
    }
}

/// Resolves a relative href against the page it was found on
///
/// Without any `../` segment the href is joined directly onto the page URL, the page
/// acting as its own directory. With `../` segments the page's directory (the page URL
/// minus its last path component) is the starting point, and each `../` removes one more
/// component. Resolution never climbs above `scheme://domain`. Leading `./` segments are
/// dropped.
fn resolve_relative(href: &str, page_url: &str) -> String {
    let mut rel = href;
    let mut parents = 0usize;

    loop {
        if let Some(rest) = rel.strip_prefix("./") {
            rel = rest;
        } else if let Some(rest) = rel.strip_prefix("../") {
            parents += 1;
            rel = rest;
        } else if rel == "." {
            rel = "";
        } else if rel == ".." {
            parents += 1;
            rel = "";
        } else {
            break;
        }
    }

    let page = page_url.trim_end_matches('/');
    let dir = if parents == 0 {
        page
    } else {
        (0..=parents).fold(page, |dir, _| parent_dir(dir))
    };

    if rel.is_empty() {
        dir.to_string()
    } else {
        format!("{}/{}", dir, rel)
    }
}

/// Drops the last path component of an absolute URL, stopping at `scheme://domain`
fn parent_dir(url: &str) -> &str {
    let authority_start = url.find("://").map_or(0, |i| i + 3);

    match url[authority_start..].rfind('/') {
        Some(index) => &url[..authority_start + index],
        None => url,
    }
}

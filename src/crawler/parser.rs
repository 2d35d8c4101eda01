//! HTML analyzer for extracting page metadata and links
//!
//! This module handles parsing HTML content to extract:
//! - Page title, meta description, meta keywords and first `<h1>`
//! - Raw `href` values of every `<a href>` in document order

use crate::state::PageMeta;
use scraper::{ElementRef, Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAnalysis {
    /// Title, description, keywords and heading
    pub meta: PageMeta,

    /// Raw `href` values in document order, not yet resolved or filtered
    pub hrefs: Vec<String>,
}

/// Analyzes a response body as HTML
///
/// Invalid UTF-8 sequences are replaced rather than rejected, so any body can be analyzed.
pub fn analyze(body: &[u8]) -> PageAnalysis {
    parse_html(&String::from_utf8_lossy(body))
}

/// Parses HTML content and extracts metadata and links
///
/// # Extraction Rules
///
/// - Tag and attribute names are matched case-insensitively (the HTML parser lowercases
///   them)
/// - `<meta>` elements are matched on their `name` attribute case-insensitively, so
///   `name="Description"` counts
/// - Each field is the first match in document order, trimmed; `None` when there is no
///   match
/// - Every `<a href>` contributes its raw attribute value, duplicates included
///
/// # Example
///
/// ```
/// use site_sweep::crawler::parse_html;
///
/// let html = r#"<html><head><TITLE> Test </TITLE></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.meta.title, Some("Test".to_string()));
/// assert_eq!(parsed.hrefs, vec!["/page".to_string()]);
/// ```
pub fn parse_html(html: &str) -> PageAnalysis {
    let document = Html::parse_document(html);

    let meta = PageMeta {
        title: first_element_text(&document, "title"),
        description: meta_content(&document, "description"),
        keywords: meta_content(&document, "keywords"),
        heading: first_element_text(&document, "h1"),
    };

    PageAnalysis {
        meta,
        hrefs: extract_hrefs(&document),
    }
}

/// Trimmed text of the first element with the given tag name
fn first_element_text(document: &Html, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Trimmed `content` of the first `<meta>` whose `name` equals `name` case-insensitively
fn meta_content(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;

    document
        .select(&selector)
        .find(|element| has_attr_value(element, "name", name))
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
}

fn has_attr_value(element: &ElementRef<'_>, attr: &str, expected: &str) -> bool {
    element
        .value()
        .attr(attr)
        .is_some_and(|value| value.trim().eq_ignore_ascii_case(expected))
}

/// Raw href values of all anchors, in document order
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

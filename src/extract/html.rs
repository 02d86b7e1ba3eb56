//! HTML link extraction
//!
//! Collects raw link values from rendered page markup. Values are returned exactly as
//! written (trimmed); resolution to absolute URLs happens in the URL normalizer.

use scraper::{Html, Selector};

/// Where in the markup a link value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// `href` of an `<a>` element
    Anchor,
    /// `src` of any element (`<img>`, `<source>`, `<iframe>`, ...)
    Source,
}

/// A link value as found in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub value: String,
    pub kind: LinkSource,
}

/// Extracts link values from an HTML document
///
/// # Extraction Rules
///
/// **Anchors:** every `<a href>` value, except empty values, `mailto:` links and
/// same-page `#fragment` links.
///
/// **Sources:** when `include_assets` is set, every non-empty `src` attribute on any
/// element. Sources follow all anchors.
///
/// Both groups are in document order. Malformed markup is parsed permissively and never
/// fails.
///
/// # Example
///
/// ```
/// use link_auditor::extract::{extract_html_links, LinkSource};
///
/// let html = r#"<p><a href="/about">About</a><img src="/logo.png"></p>"#;
/// let links = extract_html_links(html, true);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].value, "/about");
/// assert_eq!(links[1].kind, LinkSource::Source);
/// ```
pub fn extract_html_links(html: &str, include_assets: bool) -> Vec<RawLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();

            // Skip emails and same-page anchors
            if href.is_empty() || href.starts_with("mailto:") || href.starts_with('#') {
                continue;
            }

            links.push(RawLink {
                value: href.to_string(),
                kind: LinkSource::Anchor,
            });
        }
    }

    if include_assets {
        if let Ok(src_selector) = Selector::parse("[src]") {
            for element in document.select(&src_selector) {
                let Some(src) = element.value().attr("src") else {
                    continue;
                };
                let src = src.trim();
                if src.is_empty() {
                    continue;
                }

                links.push(RawLink {
                    value: src.to_string(),
                    kind: LinkSource::Source,
                });
            }
        }
    }

    links
}

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches an explicit URI scheme such as `mailto:` or `tel:`
static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").expect("valid scheme pattern"));

/// Resolves a raw link value to an absolute URL
///
/// # Resolution Rules
///
/// 1. Empty values and `javascript:` pseudo-links are dropped
/// 2. Absolute `http://` / `https://` URLs are returned unchanged
/// 3. Protocol-relative `//host/...` takes the base URL's scheme (`https` if the base
///    has none)
/// 4. Any other explicit scheme (`mailto:`, `tel:`, `data:`, ...) is dropped
/// 5. Root-relative `/path` resolves against the base origin, port included
/// 6. Path-relative values resolve against the base directory. When the last base
///    segment looks like a file (contains a `.`) its parent directory is used.
///    `./` segments collapse and `../` removes the preceding segment, never above root
///
/// Query and fragment of the raw value are kept as-is. A value that is only a query or
/// fragment keeps the base path unchanged.
///
/// # Arguments
///
/// * `raw` - The link value as written in the markup
/// * `base` - Absolute URL of the page the value was found on
///
/// # Returns
///
/// * `Some(String)` - The absolute URL
/// * `None` - The value is not a checkable link or cannot be resolved
///
/// # Examples
///
/// ```
/// use link_auditor::url::normalize_link;
///
/// let base = "https://example.com/blog/post.html";
/// assert_eq!(
///     normalize_link("../about", base).as_deref(),
///     Some("https://example.com/about")
/// );
/// assert_eq!(normalize_link("mailto:team@example.com", base), None);
/// ```
pub fn normalize_link(raw: &str, base: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("javascript:") {
        return None;
    }
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Some(raw.to_string());
    }

    if raw.starts_with("//") {
        let scheme = Url::parse(base)
            .map(|b| b.scheme().to_string())
            .unwrap_or_else(|_| "https".to_string());
        return Some(format!("{}:{}", scheme, raw));
    }

    if SCHEME_PREFIX.is_match(raw) {
        return None;
    }

    let base = Url::parse(base).ok()?;
    let host = base.host_str()?;
    let origin = match base.port() {
        Some(port) => format!("{}://{}:{}", base.scheme(), host, port),
        None => format!("{}://{}", base.scheme(), host),
    };

    let (path, suffix) = split_suffix(raw);
    let resolved = if path.is_empty() {
        // Query- or fragment-only reference: same document
        base.path().to_string()
    } else if path.starts_with('/') {
        collapse_dot_segments(path)
    } else {
        collapse_dot_segments(&format!("{}{}", base_directory(base.path()), path))
    };

    Some(format!("{}{}{}", origin, resolved, suffix))
}

/// Splits a relative reference into its path and its `?query#fragment` suffix
fn split_suffix(raw: &str) -> (&str, &str) {
    match raw.find(['?', '#']) {
        Some(idx) => raw.split_at(idx),
        None => (raw, ""),
    }
}

/// Directory a path-relative reference resolves against, always ending in `/`
fn base_directory(path: &str) -> String {
    let last_segment = path.rsplit('/').next().unwrap_or("");

    if last_segment.contains('.') {
        path[..path.len() - last_segment.len()].to_string()
    } else if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Removes `.` and `..` segments from an absolute path
fn collapse_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    output.push("");
                }
            }
            ".." => {
                output.pop();
                if i == last {
                    output.push("");
                }
            }
            other => output.push(other),
        }
    }

    format!("/{}", output.join("/"))
}

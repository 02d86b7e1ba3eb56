/// Case-insensitive substring rules for URLs that must never be checked
///
/// A URL is ignored when it contains any of the patterns. Blank patterns are discarded so
/// an empty line in a settings textarea never ignores everything.
///
/// # Examples
///
/// ```
/// use link_auditor::url::IgnorePatterns;
///
/// let ignore = IgnorePatterns::from_lines("/cdn-cgi/\n\n  tracking.example  \n");
/// assert!(ignore.matches("https://example.com/CDN-CGI/l/email-protection"));
/// assert!(ignore.matches("https://Tracking.Example/pixel"));
/// assert!(!ignore.matches("https://example.com/about"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
}

impl IgnorePatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    /// Builds rules from newline-separated text
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Returns true if `url` contains any pattern, ignoring case
    pub fn matches(&self, url: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let url = url.to_lowercase();
        self.patterns.iter().any(|p| url.contains(p.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

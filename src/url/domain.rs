use crate::{UrlError, UrlResult};
use std::collections::HashSet;
use url::Url;

/// Extracts the lowercase host from an absolute URL string
///
/// # Examples
///
/// ```
/// use link_auditor::url::host_of;
///
/// assert_eq!(host_of("https://EXAMPLE.com:8080/path").unwrap(), "example.com");
/// assert!(host_of("/relative/path").is_err());
/// ```
pub fn host_of(url: &str) -> UrlResult<String> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;
    parsed
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))
}

/// The set of hosts the corpus is served from
///
/// Hosts are stored lowercase and compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteHosts {
    hosts: HashSet<String>,
}

impl SiteHosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the host set from site base URLs
    ///
    /// Base URLs that cannot be parsed or carry no host are skipped with a warning.
    pub fn from_base_urls<I, S>(base_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hosts = Self::new();
        for base_url in base_urls {
            let base_url = base_url.as_ref();
            match host_of(base_url) {
                Ok(host) => {
                    hosts.hosts.insert(host);
                }
                Err(e) => {
                    tracing::warn!("Skipping site base URL {}: {}", base_url, e);
                }
            }
        }
        hosts
    }

    pub fn insert(&mut self, host: &str) {
        self.hosts.insert(host.to_lowercase());
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(&host.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Returns a copy of the set extended with the host of `url`, if it has one
    pub fn with_url_host(&self, url: &str) -> Self {
        let mut extended = self.clone();
        if let Ok(host) = host_of(url) {
            extended.hosts.insert(host);
        }
        extended
    }
}

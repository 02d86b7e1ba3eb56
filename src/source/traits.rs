use crate::config::Config;
use crate::model::Page;
use crate::url::SiteHosts;
use crate::SourceError;

/// Which pages of the corpus a scan covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFilter {
    /// Site labels to include; empty means every site
    pub sites: Vec<String>,
    /// Include pages that are not live (pending, expired, disabled, draft)
    pub include_disabled: bool,
    pub scope: EntryScope,
}

/// Narrows a scan to sections or entry types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntryScope {
    #[default]
    All,
    /// Section handles; empty means every section
    Sections(Vec<String>),
    /// Entry type handles; empty means every entry type
    EntryTypes(Vec<String>),
}

impl PageFilter {
    /// Returns true if the page passes the site, status and scope filters
    ///
    /// Pages without a URL never pass.
    pub fn admits(&self, page: &Page) -> bool {
        if page.url.trim().is_empty() {
            return false;
        }

        if !self.sites.is_empty()
            && !self
                .sites
                .iter()
                .any(|site| site.eq_ignore_ascii_case(&page.site_label))
        {
            return false;
        }

        if !self.include_disabled && !page.is_live() {
            return false;
        }

        match &self.scope {
            EntryScope::All => true,
            EntryScope::Sections(handles) => matches_handle(handles, page.section.as_deref()),
            EntryScope::EntryTypes(handles) => {
                matches_handle(handles, page.entry_type.as_deref())
            }
        }
    }
}

fn matches_handle(handles: &[String], value: Option<&str>) -> bool {
    if handles.is_empty() {
        return true;
    }
    match value {
        Some(value) => handles.iter().any(|h| h.eq_ignore_ascii_case(value)),
        None => false,
    }
}

/// Enumerates the pages to scan
pub trait ContentSource {
    /// Lists scannable pages matching the filter, in a stable order
    fn list_scannable_pages(&self, filter: &PageFilter) -> Result<Vec<Page>, SourceError>;
}

/// Knows which hosts the corpus is served from
pub trait SiteRegistry {
    fn list_site_hosts(&self) -> SiteHosts;
}

impl SiteRegistry for Config {
    fn list_site_hosts(&self) -> SiteHosts {
        SiteHosts::from_base_urls(self.sites.iter().map(|site| site.base_url.as_str()))
    }
}

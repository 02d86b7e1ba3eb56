//! Content source module
//!
//! The engine reads pages and site hosts through the traits defined here. `ManifestSource`
//! provides pages from a TOML manifest; `Config` provides site hosts from its `[[site]]`
//! entries.

mod manifest;
mod traits;

pub use manifest::ManifestSource;
pub use traits::{ContentSource, EntryScope, PageFilter, SiteRegistry};

//! Link extraction module
//!
//! Pulls candidate links out of rendered HTML and out of structured content fields.

mod content;
mod html;

pub use content::{extract_field_urls, extract_text_urls};
pub use html::{extract_html_links, LinkSource, RawLink};

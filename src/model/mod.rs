//! Data model shared by every stage of a scan
//!
//! # Components
//!
//! - `Page`: a content item handed over by the content source
//! - `FieldValue`: arbitrarily nested structured content of a page
//! - `LinkRecord`: one discovered link and, once verified, its outcome
//! - `PageResult`: a scanned page and its links

mod field;
mod link;
mod page;

pub use field::FieldValue;
pub use link::{LinkRecord, LinkType, RedirectInfo};
pub use page::{Page, PageMeta, PageResult, PageStatus};

//! Link verification module
//!
//! This module contains the HTTP side of a scan:
//! - Verifier: shared client, HEAD/GET checks and HTML fetching
//! - Redirects: manual redirect chain following
//! - Outcome: per-URL results and transport failure categories
//! - Pool: bounded-concurrency verification of URL batches

mod fetcher;
mod outcome;
mod pool;
mod redirects;

pub use fetcher::{build_http_client, Verifier};
pub use outcome::{classify_failure, is_ok_status, FailureKind, LinkOutcome};
pub use pool::check_urls_concurrently;
pub use redirects::{is_redirect_status, send_following_redirects, RequestFailure};

//! HTTP redirect chain resolution
//!
//! The shared client never follows redirects on its own; this module follows them hop by
//! hop so every intermediate status code and target can be recorded.

use crate::model::RedirectInfo;
use reqwest::{header::LOCATION, Client, Method, Response};
use std::fmt;
use url::Url;

/// Why a request produced no final response
#[derive(Debug)]
pub enum RequestFailure {
    /// Connect, TLS, timeout or protocol error from reqwest
    Transport(reqwest::Error),
    /// The chain kept redirecting past the configured cap
    TooManyRedirects { max: usize },
    /// The URL could not be parsed into a request target
    InvalidUrl(String),
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{}", e),
            Self::TooManyRedirects { max } => {
                write!(f, "Will not follow more than {} redirects", max)
            }
            Self::InvalidUrl(detail) => write!(f, "Invalid URL: {}", detail),
        }
    }
}

/// Returns true for the statuses that carry a `Location` to follow
pub fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Sends a request and follows redirects manually up to `max_redirects` hops
///
/// The method is kept on every hop. A redirect status without a usable `Location`
/// header is treated as the final response.
///
/// # Returns
///
/// * `Ok((Response, RedirectInfo))` - The final response and the chain taken to reach it
/// * `Err(RequestFailure)` - No final response could be obtained
pub async fn send_following_redirects(
    client: &Client,
    method: Method,
    url: &str,
    max_redirects: usize,
) -> Result<(Response, RedirectInfo), RequestFailure> {
    let mut current =
        Url::parse(url).map_err(|e| RequestFailure::InvalidUrl(format!("{}: {}", url, e)))?;
    let mut status_codes: Vec<u16> = Vec::new();
    let mut urls: Vec<String> = Vec::new();

    loop {
        let response = client
            .request(method.clone(), current.clone())
            .send()
            .await
            .map_err(RequestFailure::Transport)?;

        let status = response.status().as_u16();
        if !is_redirect_status(status) {
            return Ok((response, RedirectInfo::from_chain(url, status_codes, urls)));
        }

        let Some(next) = location_target(&response, &current) else {
            tracing::debug!("Redirect {} from {} without usable Location", status, current);
            return Ok((response, RedirectInfo::from_chain(url, status_codes, urls)));
        };

        if status_codes.len() >= max_redirects {
            return Err(RequestFailure::TooManyRedirects { max: max_redirects });
        }

        tracing::trace!("{} {} -> {}", status, current, next);
        status_codes.push(status);
        urls.push(next.to_string());
        current = next;
    }
}

/// Resolves the `Location` header of a response against the URL that produced it
fn location_target(response: &Response, current: &Url) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}

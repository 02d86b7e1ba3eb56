//! HTTP verifier
//!
//! This module handles all HTTP requests made during a scan:
//! - Building the shared HTTP client from the client configuration
//! - HEAD-then-GET single URL checks
//! - GET requests used by the verification pool
//! - Fetching rendered page HTML for link extraction

use crate::config::ClientConfig;
use crate::verify::outcome::{FailureKind, LinkOutcome};
use crate::verify::redirects::{send_following_redirects, RequestFailure};
use reqwest::{redirect::Policy, Client, Method};
use std::time::Duration;

/// Statuses that make a HEAD check fall back to GET
///
/// Many servers reject or mishandle HEAD while serving GET fine.
const HEAD_FALLBACK_STATUSES: &[u16] = &[400, 403, 404, 405];

/// Builds an HTTP client with proper configuration
///
/// Redirects are disabled on the client; they are followed manually so the chain can be
/// recorded.
///
/// # Example
///
/// ```no_run
/// use link_auditor::config::ClientConfig;
/// use link_auditor::verify::build_http_client;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Makes verification requests with one long-lived HTTP client
///
/// Cloning is cheap: clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct Verifier {
    client: Client,
    max_redirects: usize,
}

impl Verifier {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(build_http_client(config)?, config.max_redirects))
    }

    /// Wraps an existing client, which must have automatic redirects disabled
    pub fn from_client(client: Client, max_redirects: usize) -> Self {
        Self {
            client,
            max_redirects,
        }
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Checks a single URL
    ///
    /// # Request Flow
    ///
    /// 1. Send HEAD, following redirects
    /// 2. If the final status is 400, 403, 404 or 405, repeat with GET and use that
    ///    response instead
    /// 3. Transport failures are categorized, never returned as errors
    pub async fn check_url(&self, url: &str) -> LinkOutcome {
        let head = self.request(Method::HEAD, url).await;

        match head.status_code {
            Some(status) if HEAD_FALLBACK_STATUSES.contains(&status) => {
                tracing::debug!("HEAD {} returned {}, retrying with GET", url, status);
                self.get(url).await
            }
            _ => head,
        }
    }

    /// Checks a URL with a single GET (redirects followed)
    pub async fn get(&self, url: &str) -> LinkOutcome {
        self.request(Method::GET, url).await
    }

    /// Fetches the body of a page
    ///
    /// Returns the body only for a final 2xx/3xx response; every failure yields `None`.
    pub async fn fetch_html(&self, url: &str) -> Option<String> {
        let (response, _) =
            match send_following_redirects(&self.client, Method::GET, url, self.max_redirects)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    tracing::debug!("Could not fetch HTML for {}: {}", url, e);
                    return None;
                }
            };

        let status = response.status().as_u16();
        if !(200..400).contains(&status) {
            tracing::debug!("Not reading HTML for {}: status {}", url, status);
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, e);
                None
            }
        }
    }

    async fn request(&self, method: Method, url: &str) -> LinkOutcome {
        match send_following_redirects(&self.client, method, url, self.max_redirects).await {
            Ok((response, redirect_info)) => {
                LinkOutcome::from_status(response.status(), redirect_info)
            }
            Err(RequestFailure::Transport(e)) => {
                let kind = FailureKind::from_reqwest(&e);
                tracing::debug!("Request to {} failed ({:?}): {}", url, kind, e);
                LinkOutcome::failed(url, kind)
            }
            Err(other) => LinkOutcome::failed(url, FailureKind::Network(other.to_string())),
        }
    }
}

//! Verification outcomes and transport failure categories

use crate::model::{LinkRecord, RedirectInfo};
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::fmt;

/// Category of a request that produced no HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Host name could not be resolved
    Dns,
    /// Connect or request timeout
    Timeout,
    /// Certificate or TLS handshake failure
    Tls,
    /// TCP connection could not be established
    ConnectionRefused,
    /// Anything else, with the underlying error text
    Network(String),
}

impl FailureKind {
    /// Human-readable message stored on the link record
    pub fn message(&self) -> String {
        match self {
            Self::Dns => "Domain could not be resolved (DNS error)".to_string(),
            Self::Timeout => "Connection timed out".to_string(),
            Self::Tls => "Invalid SSL certificate or HTTPS error".to_string(),
            Self::ConnectionRefused => "Could not connect to server".to_string(),
            Self::Network(detail) => format!("Network error: {}", detail),
        }
    }

    /// Categorizes a reqwest transport error
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        classify_failure(&error_text(error), error.is_timeout(), error.is_connect())
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Categorizes a transport failure from its error text and reqwest's error flags
///
/// Checked in order: timeout, DNS, TLS, connect, then generic network error.
/// DNS and TLS failures surface as connect errors too, so they are matched on
/// text before the connect flag is considered.
pub fn classify_failure(text: &str, is_timeout: bool, is_connect: bool) -> FailureKind {
    let lowered = text.to_lowercase();

    if is_timeout || lowered.contains("timed out") {
        return FailureKind::Timeout;
    }

    if lowered.contains("dns error")
        || lowered.contains("failed to lookup address")
        || lowered.contains("no such host")
        || lowered.contains("name or service not known")
    {
        return FailureKind::Dns;
    }

    if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        return FailureKind::Tls;
    }

    if is_connect {
        return FailureKind::ConnectionRefused;
    }

    FailureKind::Network(text.to_string())
}

/// Joins the error's chain of sources
///
/// The top-level reqwest message embeds the request URL, so it is only used when the
/// error has no source.
fn error_text(error: &reqwest::Error) -> String {
    let Some(first) = error.source() else {
        return error.to_string();
    };

    let mut text = first.to_string();
    let mut source = first.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// The verification result for one URL
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOutcome {
    pub status_code: Option<u16>,
    pub ok: bool,
    pub message: String,
    pub redirect_info: RedirectInfo,
    /// Set when no HTTP response was received
    pub failure: Option<FailureKind>,
}

impl LinkOutcome {
    /// Outcome of a request that produced a final HTTP response
    pub fn from_status(status: StatusCode, redirect_info: RedirectInfo) -> Self {
        Self {
            status_code: Some(status.as_u16()),
            ok: is_ok_status(status.as_u16()),
            message: status.canonical_reason().unwrap_or("").to_string(),
            redirect_info,
            failure: None,
        }
    }

    /// Outcome of a request that failed before a response arrived
    pub fn failed(url: &str, kind: FailureKind) -> Self {
        Self {
            status_code: None,
            ok: false,
            message: kind.message(),
            redirect_info: RedirectInfo::none(url),
            failure: Some(kind),
        }
    }

    /// Outcome for a URL whose verification never settled
    pub fn no_response(url: &str) -> Self {
        Self {
            status_code: None,
            ok: false,
            message: "No response".to_string(),
            redirect_info: RedirectInfo::none(url),
            failure: None,
        }
    }

    /// Copies the outcome onto a link record
    pub fn apply_to(&self, record: &mut LinkRecord) {
        record.status_code = self.status_code;
        record.ok = self.ok;
        record.message = self.message.clone();
        record.redirect_info = self.redirect_info.clone();
    }
}

/// Any 2xx or 3xx status counts as reachable
pub fn is_ok_status(status: u16) -> bool {
    (200..400).contains(&status)
}

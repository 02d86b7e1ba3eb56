//! Bounded-concurrency batch verification

use crate::scan::clamp_concurrency;
use crate::verify::{LinkOutcome, Verifier};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Verifies a batch of URLs with at most `concurrency` requests in flight
///
/// Every distinct URL gets a GET (redirects followed). `concurrency` is clamped to
/// `[1, 50]`. The returned map holds exactly one outcome per distinct input URL: a URL
/// whose task was lost gets a "No response" outcome. Returns once every request has
/// settled.
///
/// # Example
///
/// ```no_run
/// use link_auditor::config::ClientConfig;
/// use link_auditor::verify::{check_urls_concurrently, Verifier};
///
/// # async fn example() {
/// let verifier = Verifier::new(&ClientConfig::default()).unwrap();
/// let urls = vec!["https://example.com/".to_string()];
/// let outcomes = check_urls_concurrently(&verifier, &urls, 10).await;
/// assert_eq!(outcomes.len(), 1);
/// # }
/// ```
pub async fn check_urls_concurrently(
    verifier: &Verifier,
    urls: &[String],
    concurrency: usize,
) -> HashMap<String, LinkOutcome> {
    let mut seen = HashSet::new();
    let unique: Vec<&String> = urls.iter().filter(|url| seen.insert(url.as_str())).collect();

    let mut outcomes = HashMap::with_capacity(unique.len());
    if unique.is_empty() {
        return outcomes;
    }

    let limit = clamp_concurrency(concurrency);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut tasks = JoinSet::new();

    tracing::debug!("Verifying {} URLs, {} at a time", unique.len(), limit);

    for url in &unique {
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };
        let verifier = verifier.clone();
        let url = url.to_string();

        tasks.spawn(async move {
            let _permit = permit;
            let outcome = verifier.get(&url).await;
            (url, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((url, outcome)) => {
                outcomes.insert(url, outcome);
            }
            Err(e) => tracing::warn!("Verification task failed: {}", e),
        }
    }

    for url in unique {
        if !outcomes.contains_key(url.as_str()) {
            outcomes.insert(url.clone(), LinkOutcome::no_response(url));
        }
    }

    outcomes
}

//! HTTP transport: the [`Fetch`] capability and its reqwest implementation.
//!
//! Recipe sites are fetched through the [`Fetch`] trait so the orchestrator
//! never knows whether bytes came over HTTP, from a script runner, or from
//! a test double. [`HttpFetcher`] is the built-in implementation: a
//! configured [`reqwest::Client`] with browser-like headers, cookie
//! support, and rotating User-Agent strings, streaming the body into a
//! [`TransferBuffer`] so the size cap applies before the payload is whole.

use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use rand::seq::SliceRandom;

use crate::buffer::TransferBuffer;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};

/// Realistic browser User-Agent strings, rotated per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Transport capability: retrieve a URL's payload into a buffer.
///
/// Implementations must be `Send + Sync`; the orchestrator runs them on a
/// background task. Script-runner transports and test doubles implement
/// this alongside [`HttpFetcher`].
pub trait Fetch: Send + Sync {
    /// Fetch `url` and write the response body into `buffer`.
    ///
    /// # Errors
    ///
    /// [`SearchError::Timeout`] when the site does not respond in time,
    /// [`SearchError::Http`] for any other transport failure, and the
    /// buffer's own [`SearchError::TooLarge`] / [`SearchError::LowMemory`]
    /// when the body outgrows it.
    fn fetch(
        &self,
        url: &str,
        config: &SearchConfig,
        buffer: &mut TransferBuffer,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// The built-in HTTP transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        config: &SearchConfig,
        buffer: &mut TransferBuffer,
    ) -> Result<()> {
        let client = build_client(config)?;

        tracing::trace!(url, "fetching recipe listing");
        let response = client
            .get(url)
            .header("Referer", url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error("request failed", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http(format!("HTTP status {status} from {url}")));
        }

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| classify_reqwest_error("body read failed", &e))?;
            buffer.write(&chunk)?;
        }

        tracing::debug!(url, bytes = buffer.size(), "fetch complete");
        Ok(())
    }
}

fn classify_reqwest_error(context: &str, e: &reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout(format!("{context}: {e}"))
    } else {
        SearchError::Http(format!("{context}: {e}"))
    }
}

/// Build a [`reqwest::Client`] configured for recipe site scraping.
///
/// The client has:
/// - Cookie store enabled (consent banners, session-gated listings)
/// - Timeout from config
/// - Random User-Agent from built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        let config = SearchConfig::default();
        let client = build_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        let client = build_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn user_agents_list_not_empty() {
        assert!(!USER_AGENTS.is_empty());
        assert_eq!(USER_AGENTS.len(), 5);
    }

    #[tokio::test]
    #[ignore] // Live network test — run with `cargo test -- --ignored`
    async fn live_fetch_fills_buffer() {
        let config = SearchConfig::default();
        let mut buffer = TransferBuffer::new();
        let result = HttpFetcher
            .fetch("https://www.simplyrecipes.com/", &config, &mut buffer)
            .await;
        assert!(result.is_ok(), "live fetch failed: {result:?}");
        assert!(!buffer.is_empty());
    }
}

//! The search pipeline: validate, build URL, fetch, extract, rank.
//!
//! [`run_search`] executes one complete search on the calling task and
//! always returns a [`SearchOutcome`] — failures become failure outcomes
//! with a user-facing status, never panics or bare errors. All per-search
//! state is created here and handed off inside the outcome; nothing is
//! shared between searches.

use tracing::Instrument;

use crate::buffer::TransferBuffer;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::Fetch;
use crate::query::ClassifiedQuery;
use crate::sources::{self, SourceDescriptor};

use super::candidates::CandidateSink;
use super::ranking::{rank, RankedResult};

/// The completed result of one search, consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Whether the pipeline ran to completion.
    pub success: bool,
    /// Human-readable status line.
    pub status: String,
    /// The URL that was (or would have been) fetched. Kept on failure so
    /// the surface can still offer a link to the site.
    pub request_url: Option<String>,
    /// Ranked candidates in extraction order. Never empty on success:
    /// an empty extraction yields the source's fallback link.
    pub results: Vec<RankedResult>,
}

impl SearchOutcome {
    fn failure(error: &SearchError, request_url: Option<String>) -> Self {
        Self {
            success: false,
            status: error.user_message().to_string(),
            request_url,
            results: Vec::new(),
        }
    }
}

/// Run one search against the source at `source_index`.
///
/// The transport is injected so script-runner and test transports slot in
/// beside the HTTP one. Validation failures return immediately without
/// touching the network.
pub async fn run_search<F: Fetch>(
    fetcher: &F,
    query: &ClassifiedQuery,
    source_index: usize,
    config: &SearchConfig,
) -> SearchOutcome {
    if query.raw.trim().is_empty() {
        return SearchOutcome::failure(&SearchError::EmptyQuery, None);
    }
    if let Err(e) = config.validate() {
        return SearchOutcome::failure(&e, None);
    }
    let source = match sources::by_index(source_index) {
        Ok(source) => source,
        Err(e) => return SearchOutcome::failure(&e, None),
    };

    let span = tracing::info_span!("recipe_search", source = source.name);
    search_source(fetcher, query, source, config)
        .instrument(span)
        .await
}

async fn search_source<F: Fetch>(
    fetcher: &F,
    query: &ClassifiedQuery,
    source: &'static SourceDescriptor,
    config: &SearchConfig,
) -> SearchOutcome {
    let url = match source.build_url(&query.raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, "could not build search URL");
            return SearchOutcome::failure(&e, None);
        }
    };

    let mut buffer = TransferBuffer::new();
    if let Err(e) = fetcher.fetch(&url, config, &mut buffer).await {
        tracing::warn!(url, error = %e, "fetch failed");
        return SearchOutcome::failure(&e, Some(url));
    }

    if buffer.is_empty() {
        let e = SearchError::Parse("empty response body".into());
        tracing::warn!(url, "fetch returned empty body");
        return SearchOutcome::failure(&e, Some(url));
    }

    let mut sink = CandidateSink::new(config.max_results);
    if let Err(e) = source
        .extractor
        .extract(buffer.as_bytes(), &query.raw, &mut sink)
    {
        // Extraction trouble degrades to the fallback link, never a crash.
        tracing::warn!(url, error = %e, "extraction failed, using fallback");
        sink = CandidateSink::new(config.max_results);
    }

    let extracted = sink.len();
    let mut results = rank(sink.into_links(), query);
    if results.is_empty() {
        tracing::debug!(url, extracted, "no candidates survived, adding fallback link");
        results.push(RankedResult {
            title: source.fallback_label.to_string(),
            url: source.fallback_url.to_string(),
            perfect_match: false,
            partial_match: false,
            matched_tokens: 0,
            total_tokens: 0,
        });
    }

    let status = format!("Found {} recipes on {}.", results.len(), source.name);
    SearchOutcome {
        success: true,
        status,
        request_url: Some(url),
        results,
    }
}

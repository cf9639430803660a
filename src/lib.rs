//! # ladle
//!
//! Embedded recipe search orchestration with quote-aware matching.
//!
//! This crate turns a free-text query and a chosen cooking site into a
//! ranked, de-duplicated list of recipe links. It compiles into a host
//! application as a library dependency — no services, no API keys.
//!
//! ## Design
//!
//! - Classifies the query once for quoting intent; paired quotes request
//!   exact matching, loosened to stop-word-filtered tokens
//! - One background task per search, guarded by a single-slot supervisor
//! - Streams the response into an adaptive buffer with a 32 MiB cap and
//!   a free-memory check before each growth step
//! - Twenty built-in recipe sources behind one extraction capability;
//!   extraction failures degrade to a per-site fallback link
//! - Hands the outcome to the rendering surface one result per tick
//!
//! ## Security
//!
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level
//! - Candidate titles are sanitised before returning

pub mod buffer;
pub mod channel;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod sources;

pub use buffer::{TransferBuffer, MAX_TRANSFER_SIZE};
pub use channel::{Renderer, SearchSupervisor};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use http::{Fetch, HttpFetcher};
pub use orchestrator::candidates::CandidateLink;
pub use orchestrator::ranking::RankedResult;
pub use orchestrator::search::SearchOutcome;
pub use query::{classify, ClassifiedQuery, QuoteStatus};
pub use sources::{Extract, SourceDescriptor, SourceKind};

/// Search one recipe source over HTTP.
///
/// Classifies `query`, fetches the search page of the source at
/// `source_index` (see [`sources::registry`]), extracts and ranks
/// candidate links, and returns the completed [`SearchOutcome`]. The
/// outcome is always well-formed: failures come back as failure
/// outcomes with a user-facing status line.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` fails validation before
/// the search starts. All later failures are folded into the outcome.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> ladle::Result<()> {
/// let config = ladle::SearchConfig::default();
/// let outcome = ladle::search("\"roast chicken\"", 0, &config).await?;
/// for result in &outcome.results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, source_index: usize, config: &SearchConfig) -> Result<SearchOutcome> {
    config.validate()?;
    let classified = query::classify(query);
    Ok(orchestrator::search::run_search(&HttpFetcher, &classified, source_index, config).await)
}

/// Search with sensible default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str, source_index: usize) -> Result<SearchOutcome> {
    search(query, source_index, &SearchConfig::default()).await
}

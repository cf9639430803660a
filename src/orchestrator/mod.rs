//! Search orchestration: candidate collection, dedup, ranking, pipeline.
//!
//! The orchestrator runs one search end to end on a background task:
//! build the request URL, fetch into a fresh transfer buffer, hand the
//! payload to the source's extractor, dedup and cap the candidates,
//! rank them against the classified query, and package the outcome.

pub mod candidates;
pub mod ranking;
pub mod search;
pub mod url_normalize;

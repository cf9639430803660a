//! Extractor for payloads produced by external scraper scripts.
//!
//! Script-backed sources run a headless scraper out of process; its
//! stdout — captured through the transport — is a JSON array of
//! `{"title": …, "url": …}` objects. This extractor only validates and
//! unpacks that array; running the script is the transport's problem.

use serde::Deserialize;

use crate::error::{Result, SearchError};
use crate::orchestrator::candidates::CandidateSink;

use super::Extract;

/// One entry in a scraper script's output array.
#[derive(Debug, Deserialize)]
struct ScriptLink {
    title: String,
    url: String,
}

/// Extracts candidates from scraper-script JSON output.
pub struct ScriptOutputExtractor;

impl Extract for ScriptOutputExtractor {
    fn extract(&self, payload: &[u8], _search_term: &str, sink: &mut CandidateSink) -> Result<()> {
        let links: Vec<ScriptLink> = serde_json::from_slice(payload)
            .map_err(|e| SearchError::Parse(format!("script output is not a link array: {e}")))?;

        let total = links.len();
        for link in links {
            if link.url.is_empty() {
                continue;
            }
            sink.push(&link.title, &link.url);
        }

        tracing::debug!(total, kept = sink.len(), "script output unpacked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_link_array() {
        let payload = br#"[
            {"title": "roast chicken", "url": "https://example.com/roast-chicken"},
            {"title": "chicken soup", "url": "https://example.com/chicken-soup"}
        ]"#;
        let mut sink = CandidateSink::new(50);
        ScriptOutputExtractor
            .extract(payload, "chicken", &mut sink)
            .expect("valid array should unpack");
        let links = sink.into_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "Roast Chicken");
        assert_eq!(links[1].url, "https://example.com/chicken-soup");
    }

    #[test]
    fn empty_array_is_valid_and_empty() {
        let mut sink = CandidateSink::new(50);
        ScriptOutputExtractor
            .extract(b"[]", "chicken", &mut sink)
            .expect("empty array is valid");
        assert!(sink.is_empty());
    }

    #[test]
    fn non_json_payload_is_parse_error() {
        let mut sink = CandidateSink::new(50);
        let err = ScriptOutputExtractor
            .extract(b"<html>not json</html>", "chicken", &mut sink)
            .unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn object_payload_is_parse_error() {
        let mut sink = CandidateSink::new(50);
        let err = ScriptOutputExtractor
            .extract(br#"{"title": "x", "url": "y"}"#, "x", &mut sink)
            .unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn entries_with_empty_urls_skipped() {
        let payload = br#"[
            {"title": "good", "url": "https://example.com/good"},
            {"title": "bad", "url": ""}
        ]"#;
        let mut sink = CandidateSink::new(50);
        ScriptOutputExtractor
            .extract(payload, "x", &mut sink)
            .expect("array should unpack");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn duplicate_urls_collapse_in_sink() {
        let payload = br#"[
            {"title": "first", "url": "https://example.com/same"},
            {"title": "second", "url": "https://example.com/same"}
        ]"#;
        let mut sink = CandidateSink::new(50);
        ScriptOutputExtractor
            .extract(payload, "x", &mut sink)
            .expect("array should unpack");
        assert_eq!(sink.len(), 1);
    }
}

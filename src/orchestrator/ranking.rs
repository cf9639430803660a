//! Exact-match ranking of candidate links against a classified query.
//!
//! Ranking only applies when the query carried paired quotes: each
//! loosened token is checked for lowercase substring containment in the
//! candidate title. Candidates matching every token are perfect matches,
//! candidates matching some are partial matches, and candidates matching
//! none are dropped. Queries without paired quotes pass every candidate
//! through unranked. A paired query whose loosening left no tokens
//! drops every candidate — the orchestrator's fallback link takes over.
//!
//! Containment is deliberately substring-based, not word-boundary-based:
//! the token `chick` matches the title "Chicken Pot Pie". Looser matching
//! keeps result lists full on sites with terse titles.

use crate::query::ClassifiedQuery;

use super::candidates::CandidateLink;

/// A candidate link annotated with its match quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    /// Tidied display title.
    pub title: String,
    /// Absolute URL of the recipe page.
    pub url: String,
    /// Every loosened token was found in the title.
    pub perfect_match: bool,
    /// Some, but not all, loosened tokens were found.
    pub partial_match: bool,
    /// How many loosened tokens matched.
    pub matched_tokens: usize,
    /// How many loosened tokens were checked.
    pub total_tokens: usize,
}

impl RankedResult {
    fn unranked(link: CandidateLink) -> Self {
        Self {
            title: link.title,
            url: link.url,
            perfect_match: false,
            partial_match: false,
            matched_tokens: 0,
            total_tokens: 0,
        }
    }
}

/// Rank candidates against the classified query, preserving input order.
///
/// No cross-group sort happens: a partial match that arrived before a
/// perfect match stays before it. The caller decides presentation.
pub fn rank(candidates: Vec<CandidateLink>, query: &ClassifiedQuery) -> Vec<RankedResult> {
    if !query.wants_ranking() {
        return candidates.into_iter().map(RankedResult::unranked).collect();
    }

    let tokens = &query.loosened_tokens;
    let total_tokens = tokens.len();
    let mut ranked = Vec::with_capacity(candidates.len());
    let mut dropped = 0usize;

    for link in candidates {
        let haystack = link.title.to_lowercase();
        let matched_tokens = tokens
            .iter()
            .filter(|token| haystack.contains(token.as_str()))
            .count();

        if matched_tokens == 0 {
            dropped += 1;
            continue;
        }

        ranked.push(RankedResult {
            title: link.title,
            url: link.url,
            perfect_match: matched_tokens == total_tokens,
            partial_match: matched_tokens < total_tokens,
            matched_tokens,
            total_tokens,
        });
    }

    tracing::debug!(kept = ranked.len(), dropped, total_tokens, "ranked candidates");
    ranked
}

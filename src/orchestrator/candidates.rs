//! Per-search candidate collection: dedup, title tidy-up, result ceiling.
//!
//! Extractors push raw `(title, url)` pairs into a [`CandidateSink`];
//! the sink owns all per-search accumulation state. Each search gets a
//! fresh sink, so nothing leaks between searches.

use std::collections::HashSet;

use super::url_normalize::canonical_url;

/// One recipe link offered by a source extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Tidied display title.
    pub title: String,
    /// Absolute URL of the recipe page.
    pub url: String,
}

/// Accumulates candidates for a single search.
///
/// Accepts at most `ceiling` links; duplicates (by canonical URL) and
/// overflow are silently dropped. Titles are tidied on the way in:
/// control characters stripped, each word capitalised.
#[derive(Debug)]
pub struct CandidateSink {
    accepted: Vec<CandidateLink>,
    seen: HashSet<String>,
    ceiling: usize,
}

impl CandidateSink {
    pub fn new(ceiling: usize) -> Self {
        Self {
            accepted: Vec::new(),
            seen: HashSet::new(),
            ceiling,
        }
    }

    /// Offer a candidate. Returns `true` if it was accepted.
    pub fn push(&mut self, title: &str, url: &str) -> bool {
        if self.accepted.len() >= self.ceiling {
            tracing::trace!(url, "candidate dropped: sink at capacity");
            return false;
        }

        let key = canonical_url(url);
        if !self.seen.insert(key) {
            tracing::trace!(url, "candidate dropped: duplicate");
            return false;
        }

        self.accepted.push(CandidateLink {
            title: tidy_title(title),
            url: url.to_string(),
        });
        true
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Consume the sink, yielding accepted links in insertion order.
    pub fn into_links(self) -> Vec<CandidateLink> {
        self.accepted
    }
}

/// Strip control characters and capitalise each word.
fn tidy_title(raw: &str) -> String {
    let sanitised: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .collect();

    sanitised
        .split_whitespace()
        .map(capitalise_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_distinct_candidates_in_order() {
        let mut sink = CandidateSink::new(10);
        assert!(sink.push("roast chicken", "https://example.com/a"));
        assert!(sink.push("chicken soup", "https://example.com/b"));
        let links = sink.into_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com/a");
        assert_eq!(links[1].url, "https://example.com/b");
    }

    #[test]
    fn duplicate_url_rejected() {
        let mut sink = CandidateSink::new(10);
        assert!(sink.push("first", "https://example.com/recipe"));
        assert!(!sink.push("second", "https://example.com/recipe"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn equivalent_urls_count_as_duplicates() {
        let mut sink = CandidateSink::new(10);
        assert!(sink.push("first", "https://example.com/recipe/"));
        assert!(!sink.push(
            "second",
            "https://Example.COM/recipe?utm_source=feed#top"
        ));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn ceiling_caps_accepted_count() {
        let mut sink = CandidateSink::new(3);
        for i in 0..10 {
            sink.push("title", &format!("https://example.com/{i}"));
        }
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn push_past_ceiling_returns_false() {
        let mut sink = CandidateSink::new(1);
        assert!(sink.push("a", "https://example.com/a"));
        assert!(!sink.push("b", "https://example.com/b"));
    }

    #[test]
    fn titles_are_word_capitalised() {
        let mut sink = CandidateSink::new(10);
        sink.push("slow cooker PULLED pork", "https://example.com/a");
        assert_eq!(sink.into_links()[0].title, "Slow Cooker Pulled Pork");
    }

    #[test]
    fn control_characters_stripped_from_titles() {
        let mut sink = CandidateSink::new(10);
        sink.push("beef\u{0001} stew\u{007f}\n", "https://example.com/a");
        assert_eq!(sink.into_links()[0].title, "Beef Stew");
    }

    #[test]
    fn tidy_collapses_whitespace() {
        assert_eq!(tidy_title("  garlic   bread  "), "Garlic Bread");
    }

    #[test]
    fn tidy_empty_title_is_empty() {
        assert_eq!(tidy_title(""), "");
        assert_eq!(tidy_title("\u{0002}\u{0003}"), "");
    }

    #[test]
    fn fresh_sink_is_empty() {
        let sink = CandidateSink::new(50);
        assert!(sink.is_empty());
        assert_eq!(sink.len(), 0);
    }
}

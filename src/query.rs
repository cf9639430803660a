//! Query classification: quoting intent, phrase extraction, token loosening.
//!
//! A raw search string is classified once, up front, into a
//! [`ClassifiedQuery`] that the rest of the pipeline treats as immutable.
//! Quoted phrases signal exact-match intent; the classifier extracts them,
//! then loosens each phrase into lowercase tokens with common filler words
//! removed, ready for substring matching against candidate titles.

/// Words too common to carry matching signal. Dropped during loosening.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "with", "of", "in", "on", "at", "to", "for", "by",
];

/// How the query uses quote characters, after smart-quote normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStatus {
    /// No quote characters at all.
    None,
    /// Quote characters present but no kind pairs up.
    Unpaired,
    /// At least one quote kind appears an even, nonzero number of times.
    /// A stray quote of the other kind does not break pairing.
    Paired,
}

/// The immutable result of classifying a raw query string.
///
/// Cheap to clone; classification is idempotent, so re-classifying
/// [`ClassifiedQuery::raw`] yields an equal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedQuery {
    /// The query exactly as submitted.
    pub raw: String,
    /// Quoting intent detected in `raw`.
    pub quote_status: QuoteStatus,
    /// Quoted phrases in submission order, trimmed and lowercased.
    pub phrases: Vec<String>,
    /// Stop-word-filtered lowercase tokens drawn from the phrases.
    /// Empty unless `quote_status` is [`QuoteStatus::Paired`].
    pub loosened_tokens: Vec<String>,
}

impl ClassifiedQuery {
    /// Whether ranking should apply the exact-match policy.
    ///
    /// Paired quotes always request ranking, even when loosening left no
    /// tokens — no candidate can then match, so all are dropped in
    /// favour of the fallback link.
    pub fn wants_ranking(&self) -> bool {
        self.quote_status == QuoteStatus::Paired
    }
}

/// Classify a raw query string.
///
/// Total over all input: never fails, never panics. Empty or
/// whitespace-only input classifies as [`QuoteStatus::None`] with no
/// phrases. Typographic quotes (`‘ ’ “ ”`) are folded onto their ASCII
/// counterparts before counting.
pub fn classify(raw: &str) -> ClassifiedQuery {
    let normalised = normalise_quotes(raw);

    let singles = normalised.chars().filter(|&c| c == '\'').count();
    let doubles = normalised.chars().filter(|&c| c == '"').count();

    let quote_status = if singles == 0 && doubles == 0 {
        QuoteStatus::None
    } else if (singles > 0 && singles % 2 == 0) || (doubles > 0 && doubles % 2 == 0) {
        QuoteStatus::Paired
    } else {
        QuoteStatus::Unpaired
    };

    let phrases = extract_phrases(&normalised);

    let loosened_tokens = if quote_status == QuoteStatus::Paired {
        loosen(&phrases)
    } else {
        Vec::new()
    };

    tracing::trace!(
        ?quote_status,
        phrases = phrases.len(),
        tokens = loosened_tokens.len(),
        "classified query"
    );

    ClassifiedQuery {
        raw: raw.to_string(),
        quote_status,
        phrases,
        loosened_tokens,
    }
}

/// Fold typographic quotes onto their ASCII counterparts.
fn normalise_quotes(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Extract quoted phrases in submission order.
///
/// Scans left to right; each opening quote must be closed by the same
/// quote character. An opener with no closer ends the scan, leaving any
/// later text unextracted.
fn extract_phrases(normalised: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let chars: Vec<char> = normalised.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' || c == '"' {
            match chars[i + 1..].iter().position(|&other| other == c) {
                Some(offset) => {
                    let inner: String = chars[i + 1..i + 1 + offset].iter().collect();
                    let trimmed = inner.trim();
                    if !trimmed.is_empty() {
                        phrases.push(trimmed.to_lowercase());
                    }
                    i += offset + 2;
                }
                None => break,
            }
        } else {
            i += 1;
        }
    }

    phrases
}

/// Split phrases into lowercase tokens and drop stop words.
fn loosen(phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .flat_map(|phrase| phrase.split_whitespace())
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

//! Error types for the ladle crate.
//!
//! All errors use stable string messages suitable for logging and
//! programmatic handling. [`SearchError::user_message`] maps each failure
//! onto the single status line shown to the person searching, so the
//! surface never has to pattern-match on error internals.

/// Errors that can occur during a recipe search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty (or whitespace-only) after trimming.
    #[error("empty search query")]
    EmptyQuery,

    /// The requested source index does not exist in the registry.
    #[error("unknown recipe source: index {0}")]
    UnknownSource(usize),

    /// The query could not be encoded into the source's URL template.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// An HTTP request to a recipe site failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A fetch timed out before the site responded.
    #[error("fetch timed out: {0}")]
    Timeout(String),

    /// A response would exceed the hard transfer size cap.
    #[error("transfer too large: {needed} bytes needed, limit is {limit}")]
    TooLarge { needed: usize, limit: usize },

    /// The host reports too little free memory to grow the transfer buffer.
    #[error("low memory: {needed} bytes needed, {free} free")]
    LowMemory { needed: usize, free: u64 },

    /// Failed to parse the fetched payload.
    #[error("parse error: {0}")]
    Parse(String),

    /// A source extractor failed while scanning a parsed payload.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// The status line to show the person searching when this error
    /// aborts a search. One stable string per failure class.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => {
                "Please enter a recipe search term (like roast chicken, or chili)"
            }
            Self::UnknownSource(_) => "Please select a valid recipe site.",
            Self::Encoding(_) => "Failed to encode search term.",
            Self::Http(_) | Self::Timeout(_) | Self::TooLarge { .. } | Self::LowMemory { .. } => {
                "Failed to fetch recipes."
            }
            Self::Parse(_) | Self::Extraction(_) => "Failed to parse HTML from site.",
            Self::Config(_) => "Failed to fetch recipes.",
        }
    }
}

/// Convenience type alias for ladle results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_query() {
        let err = SearchError::EmptyQuery;
        assert_eq!(err.to_string(), "empty search query");
    }

    #[test]
    fn display_unknown_source() {
        let err = SearchError::UnknownSource(42);
        assert_eq!(err.to_string(), "unknown recipe source: index 42");
    }

    #[test]
    fn display_too_large() {
        let err = SearchError::TooLarge {
            needed: 40_000_000,
            limit: 33_554_432,
        };
        assert_eq!(
            err.to_string(),
            "transfer too large: 40000000 bytes needed, limit is 33554432"
        );
    }

    #[test]
    fn display_low_memory() {
        let err = SearchError::LowMemory {
            needed: 262_144,
            free: 1024,
        };
        assert_eq!(err.to_string(), "low memory: 262144 bytes needed, 1024 free");
    }

    #[test]
    fn user_message_for_empty_query_prompts_for_input() {
        let msg = SearchError::EmptyQuery.user_message();
        assert!(msg.starts_with("Please enter a recipe search term"));
    }

    #[test]
    fn user_message_for_bad_source() {
        assert_eq!(
            SearchError::UnknownSource(99).user_message(),
            "Please select a valid recipe site."
        );
    }

    #[test]
    fn fetch_failures_share_one_status_line() {
        let http = SearchError::Http("connection refused".into());
        let timeout = SearchError::Timeout("exceeded 15s limit".into());
        let large = SearchError::TooLarge {
            needed: 1,
            limit: 0,
        };
        assert_eq!(http.user_message(), "Failed to fetch recipes.");
        assert_eq!(timeout.user_message(), http.user_message());
        assert_eq!(large.user_message(), http.user_message());
    }

    #[test]
    fn parse_failures_share_one_status_line() {
        let parse = SearchError::Parse("empty body".into());
        let extract = SearchError::Extraction("bad selector".into());
        assert_eq!(parse.user_message(), "Failed to parse HTML from site.");
        assert_eq!(extract.user_message(), parse.user_message());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}

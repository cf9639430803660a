//! Anchor-scanning extractor for sites whose search pages are static HTML.
//!
//! Scans every `<a href>` in the document and keeps anchors whose href
//! contains one of the configured markers. The anchor text becomes the
//! candidate title. Deliberately dumb: no per-site CSS classes, just the
//! URL shape that distinguishes recipe links from navigation chrome.

use scraper::{Html, Selector};

use crate::error::{Result, SearchError};
use crate::orchestrator::candidates::CandidateSink;

use super::Extract;

/// Extracts candidates from anchors whose href matches a marker.
pub struct AnchorExtractor {
    /// An anchor qualifies when its href contains any of these.
    href_markers: &'static [&'static str],
}

impl AnchorExtractor {
    pub const fn new(href_markers: &'static [&'static str]) -> Self {
        Self { href_markers }
    }
}

impl Extract for AnchorExtractor {
    fn extract(&self, payload: &[u8], _search_term: &str, sink: &mut CandidateSink) -> Result<()> {
        let html = String::from_utf8_lossy(payload);
        let document = Html::parse_document(&html);

        let anchor_sel = Selector::parse("a[href]")
            .map_err(|e| SearchError::Extraction(format!("invalid anchor selector: {e:?}")))?;

        let mut scanned = 0usize;
        for anchor in document.select(&anchor_sel) {
            scanned += 1;
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !self.href_markers.iter().any(|marker| href.contains(marker)) {
                continue;
            }

            let title = anchor.text().collect::<String>().trim().to_string();
            if title.is_empty() {
                continue;
            }

            sink.push(&title, href);
        }

        tracing::debug!(scanned, kept = sink.len(), "anchor scan complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLY_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<nav><a href="https://www.simplyrecipes.com/about">About</a></nav>
<main>
    <a href="https://www.simplyrecipes.com/recipes/roast_chicken/">roast chicken</a>
    <a href="https://www.simplyrecipes.com/recipes/chicken_soup/">
        classic chicken soup
    </a>
    <a href="https://www.simplyrecipes.com/recipes/empty_title/"></a>
    <a href="https://other-site.example.com/recipes/stolen/">off-site recipe</a>
</main>
</body>
</html>"#;

    fn simply() -> AnchorExtractor {
        AnchorExtractor::new(&["simplyrecipes.com/recipes/"])
    }

    #[test]
    fn keeps_only_marker_matching_anchors() {
        let mut sink = CandidateSink::new(50);
        simply()
            .extract(SIMPLY_HTML.as_bytes(), "chicken", &mut sink)
            .expect("extraction should succeed");
        let links = sink.into_links();
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].url,
            "https://www.simplyrecipes.com/recipes/roast_chicken/"
        );
        assert_eq!(links[1].title, "Classic Chicken Soup");
    }

    #[test]
    fn anchors_without_text_skipped() {
        let mut sink = CandidateSink::new(50);
        simply()
            .extract(SIMPLY_HTML.as_bytes(), "chicken", &mut sink)
            .expect("extraction should succeed");
        assert!(sink
            .into_links()
            .iter()
            .all(|l| !l.url.contains("empty_title")));
    }

    #[test]
    fn any_marker_qualifies_an_anchor() {
        let extractor = AnchorExtractor::new(&["/search/label/", "yummlyrecipes.com"]);
        let html = r#"<body>
            <a href="/search/label/Chicken">Chicken Recipes</a>
            <a href="https://www.yummlyrecipes.com/chili">Hearty Chili</a>
            <a href="https://elsewhere.example.com/">Elsewhere</a>
        </body>"#;
        let mut sink = CandidateSink::new(50);
        extractor
            .extract(html.as_bytes(), "chicken", &mut sink)
            .expect("extraction should succeed");
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn empty_document_yields_no_candidates() {
        let mut sink = CandidateSink::new(50);
        simply()
            .extract(b"<html><body></body></html>", "chicken", &mut sink)
            .expect("extraction should succeed");
        assert!(sink.is_empty());
    }

    #[test]
    fn malformed_html_does_not_error() {
        // scraper recovers from tag soup; extraction stays total.
        let mut sink = CandidateSink::new(50);
        simply()
            .extract(b"<a href='simplyrecipes.com/recipes/x'>broken<div>", "x", &mut sink)
            .expect("tag soup should still extract");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn non_utf8_payload_is_scanned_lossily() {
        let payload = b"<a href=\"simplyrecipes.com/recipes/pie/\">apple pie \xff\xfe</a>";
        let mut sink = CandidateSink::new(50);
        simply()
            .extract(payload, "pie", &mut sink)
            .expect("lossy decode should succeed");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn sink_ceiling_respected() {
        let mut html = String::from("<body>");
        for i in 0..10 {
            html.push_str(&format!(
                "<a href=\"https://www.simplyrecipes.com/recipes/{i}\">Recipe {i}</a>"
            ));
        }
        html.push_str("</body>");
        let mut sink = CandidateSink::new(3);
        simply()
            .extract(html.as_bytes(), "recipe", &mut sink)
            .expect("extraction should succeed");
        assert_eq!(sink.len(), 3);
    }
}

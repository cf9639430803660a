//! Recipe source registry: descriptors, URL building, extraction capability.
//!
//! Each supported cooking site is a static [`SourceDescriptor`] pairing a
//! URL template with the [`Extract`] implementation that knows how to pull
//! candidate links out of that site's payload. The orchestrator selects a
//! descriptor by index and stays ignorant of per-site details.

pub mod html;
pub mod script;

use crate::error::{Result, SearchError};
use crate::orchestrator::candidates::CandidateSink;

use html::AnchorExtractor;
use script::ScriptOutputExtractor;

/// Placeholder substituted with the percent-encoded query.
const QUERY_PLACEHOLDER: &str = "{query}";

/// Extraction capability: scan a fetched payload for candidate links.
///
/// Implementations never fetch; they only read the payload handed to
/// them and push `(title, url)` pairs into the sink. An implementation
/// that finds nothing simply leaves the sink empty — the orchestrator
/// supplies the fallback link.
pub trait Extract: Send + Sync {
    /// Scan `payload` for links matching `search_term`.
    ///
    /// # Errors
    ///
    /// [`SearchError::Parse`] when the payload is not in the expected
    /// format, [`SearchError::Extraction`] when scanning itself fails.
    fn extract(&self, payload: &[u8], search_term: &str, sink: &mut CandidateSink) -> Result<()>;
}

/// How a source's payload is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The search URL returns an HTML document to scan directly.
    Document,
    /// The payload comes from an external scraper script emitting JSON.
    Script,
}

/// A supported recipe site.
pub struct SourceDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Payload production style.
    pub kind: SourceKind,
    /// Search URL with one [`QUERY_PLACEHOLDER`].
    pub url_template: &'static str,
    /// Where to send the user when no candidates were found.
    pub fallback_url: &'static str,
    /// Label shown on the fallback link.
    pub fallback_label: &'static str,
    /// The extractor for this site's payloads.
    pub extractor: &'static dyn Extract,
}

impl SourceDescriptor {
    /// Build the search URL for `raw_query`.
    ///
    /// The query is trimmed and percent-encoded before substitution.
    ///
    /// # Errors
    ///
    /// [`SearchError::Encoding`] if the template is missing its
    /// placeholder, so a malformed registry entry cannot silently search
    /// for the wrong thing.
    pub fn build_url(&self, raw_query: &str) -> Result<String> {
        if !self.url_template.contains(QUERY_PLACEHOLDER) {
            return Err(SearchError::Encoding(format!(
                "source '{}' template has no query placeholder",
                self.name
            )));
        }
        let encoded = urlencoding::encode(raw_query.trim());
        Ok(self.url_template.replace(QUERY_PLACEHOLDER, &encoded))
    }
}

impl std::fmt::Debug for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("url_template", &self.url_template)
            .finish_non_exhaustive()
    }
}

const FALLBACK_LABEL: &str =
    "Matching recipes not found. Click to open the main food website.";

static SCRIPT_EXTRACTOR: ScriptOutputExtractor = ScriptOutputExtractor;
static SIMPLY_RECIPES_EXTRACTOR: AnchorExtractor =
    AnchorExtractor::new(&["simplyrecipes.com/recipes/"]);
static YUMMLY_EXTRACTOR: AnchorExtractor =
    AnchorExtractor::new(&["/search/label/", "yummlyrecipes.com"]);

/// All supported recipe sites, in menu order.
pub fn registry() -> &'static [SourceDescriptor] {
    static REGISTRY: &[SourceDescriptor] = &[
        SourceDescriptor {
            name: "AllRecipes",
            kind: SourceKind::Script,
            url_template: "https://www.allrecipes.com/search/results/?wt={query}",
            fallback_url: "https://www.allrecipes.com/recipes/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "BBC Good Food",
            kind: SourceKind::Script,
            url_template: "https://www.bbcgoodfood.com/search?q={query}",
            fallback_url: "https://www.bbcgoodfood.com/search",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Bon Appetit",
            kind: SourceKind::Script,
            url_template: "https://www.bonappetit.com/search/{query}",
            fallback_url: "https://www.bonappetit.com/recipes",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Budget Bytes",
            kind: SourceKind::Script,
            url_template: "https://www.budgetbytes.com/?s={query}",
            fallback_url: "https://www.budgetbytes.com/recipes",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Chowhound",
            kind: SourceKind::Script,
            url_template: "https://www.chowhound.com/search?query={query}",
            fallback_url: "https://www.chowhound.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Cooks Illustrated",
            kind: SourceKind::Script,
            url_template: "https://www.americastestkitchen.com/search?q={query}",
            fallback_url: "https://www.americastestkitchen.com/recipes",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Delish",
            kind: SourceKind::Script,
            url_template: "https://www.delish.com/search/{query}/",
            fallback_url: "https://www.delish.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "EatingWell",
            kind: SourceKind::Script,
            url_template: "https://www.eatingwell.com/search/?q={query}",
            fallback_url: "https://www.eatingwell.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Epicurious",
            kind: SourceKind::Script,
            url_template: "https://www.epicurious.com/search/{query}",
            fallback_url: "https://www.epicurious.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Food52",
            kind: SourceKind::Script,
            url_template: "https://food52.com/search?q={query}",
            fallback_url: "https://food52.com/recipes",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Food Network",
            kind: SourceKind::Script,
            url_template: "https://www.foodnetwork.com/search/{query}-",
            fallback_url: "https://www.foodnetwork.com/search/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "NY Times Cooking",
            kind: SourceKind::Script,
            url_template: "https://cooking.nytimes.com/search?q={query}",
            fallback_url: "https://cooking.nytimes.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "The Kitchn",
            kind: SourceKind::Script,
            url_template: "https://www.thekitchn.com/search?q={query}",
            fallback_url: "https://www.thekitchn.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Saveur",
            kind: SourceKind::Script,
            url_template: "https://www.saveur.com/search/{query}/",
            fallback_url: "https://www.saveur.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Serious Eats",
            kind: SourceKind::Script,
            url_template: "https://www.seriouseats.com/search?q={query}",
            fallback_url: "https://www.seriouseats.com/recipes",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Simply Recipes",
            kind: SourceKind::Document,
            url_template: "https://www.simplyrecipes.com/search?q={query}",
            fallback_url: "https://www.simplyrecipes.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SIMPLY_RECIPES_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Smitten Kitchen",
            kind: SourceKind::Script,
            url_template: "https://smittenkitchen.com/?s={query}",
            fallback_url: "https://smittenkitchen.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "The Spruce Eats",
            kind: SourceKind::Script,
            url_template: "https://www.thespruceeats.com/search?q={query}",
            fallback_url: "https://www.thespruceeats.com/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Taste of Home",
            kind: SourceKind::Script,
            url_template: "https://www.tasteofhome.com/search/index?search={query}",
            fallback_url: "https://www.tasteofhome.com/recipes/",
            fallback_label: FALLBACK_LABEL,
            extractor: &SCRIPT_EXTRACTOR,
        },
        SourceDescriptor {
            name: "Yummly Recipes",
            kind: SourceKind::Document,
            url_template: "https://www.yummlyrecipes.com/?q={query}",
            fallback_url: "https://www.yummlyrecipes.com/",
            fallback_label: "Click to see Yummly Recipes Search Page",
            extractor: &YUMMLY_EXTRACTOR,
        },
    ];
    REGISTRY
}

/// Look up a source by menu index.
///
/// # Errors
///
/// [`SearchError::UnknownSource`] for out-of-range indices.
pub fn by_index(index: usize) -> Result<&'static SourceDescriptor> {
    registry()
        .get(index)
        .ok_or(SearchError::UnknownSource(index))
}

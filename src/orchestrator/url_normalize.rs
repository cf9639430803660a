//! URL canonicalisation for candidate deduplication.
//!
//! Recipe sites decorate listing links with tracking parameters and
//! fragments, so the same recipe page often appears under several raw
//! URLs. Canonicalising before comparison makes those compare equal.

use url::Url;

/// Tracking query parameters that are stripped during canonicalisation.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "si",
];

/// Canonicalise a URL for deduplication comparison.
///
/// Applies the following transformations:
///
/// 1. Lowercase scheme and host (path is preserved as-is).
/// 2. Remove default ports (`:80` for HTTP, `:443` for HTTPS).
/// 3. Remove the fragment.
/// 4. Strip known tracking parameters, then sort what remains by key.
/// 5. Remove trailing slash from the path (unless path is exactly `"/"`).
///
/// If the input cannot be parsed as a valid URL, it is returned unchanged
/// so that malformed links still deduplicate by raw string equality.
pub fn canonical_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    if is_default_port(&parsed) {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        let qs: String = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        parsed.set_query(Some(&qs));
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }

    // Url::parse already lowercases scheme and host, so the serialised
    // form is canonical.
    parsed.to_string()
}

/// Returns `true` if the URL uses the default port for its scheme.
fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_scheme_and_host() {
        let result = canonical_url("HTTPS://Food52.COM/Recipes");
        assert_eq!(result, "https://food52.com/Recipes");
    }

    #[test]
    fn removes_trailing_slash() {
        let result = canonical_url("https://www.budgetbytes.com/recipes/");
        assert_eq!(result, "https://www.budgetbytes.com/recipes");
    }

    #[test]
    fn preserves_root_slash() {
        let result = canonical_url("https://www.allrecipes.com/");
        assert_eq!(result, "https://www.allrecipes.com/");
    }

    #[test]
    fn removes_default_ports() {
        assert_eq!(
            canonical_url("http://example.com:80/recipe"),
            "http://example.com/recipe"
        );
        assert_eq!(
            canonical_url("https://example.com:443/recipe"),
            "https://example.com/recipe"
        );
    }

    #[test]
    fn preserves_non_default_port() {
        let result = canonical_url("https://example.com:8080/recipe");
        assert_eq!(result, "https://example.com:8080/recipe");
    }

    #[test]
    fn sorts_query_params_alphabetically() {
        let result = canonical_url("https://example.com/search?z=1&a=2&m=3");
        assert_eq!(result, "https://example.com/search?a=2&m=3&z=1");
    }

    #[test]
    fn removes_tracking_params() {
        let result = canonical_url(
            "https://www.seriouseats.com/recipe?q=chili&utm_source=feed&fbclid=abc&gclid=xyz",
        );
        assert_eq!(result, "https://www.seriouseats.com/recipe?q=chili");
    }

    #[test]
    fn removes_fragment() {
        let result = canonical_url("https://example.com/recipe#ingredients");
        assert_eq!(result, "https://example.com/recipe");
    }

    #[test]
    fn equivalent_urls_canonicalise_to_same_string() {
        let a = canonical_url("https://Food52.COM/recipes/chili/?b=2&a=1#top");
        let b = canonical_url("https://food52.com/recipes/chili?a=1&b=2");
        assert_eq!(a, b);
    }

    #[test]
    fn tracking_param_keys_match_case_insensitively() {
        let result = canonical_url("https://example.com/page?q=stew&UTM_Source=mail");
        assert_eq!(result, "https://example.com/page?q=stew");
    }

    #[test]
    fn invalid_url_returned_unchanged() {
        let input = "not a url at all";
        assert_eq!(canonical_url(input), input);
    }

    #[test]
    fn empty_string_returned_unchanged() {
        assert_eq!(canonical_url(""), "");
    }
}

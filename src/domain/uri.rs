//! URI-reference resolution for `$id` and `$ref`.
//!
//! RFC 3986 resolution is delegated to the `url` crate whenever the base is an
//! absolute URI. A schema without `$id` has an empty base, which `url` cannot
//! represent, so the fallback below covers the reference forms that actually
//! occur in rootless documents: absolute references and bare fragments.

use url::Url;

/// Resolve `reference` against `base`.
pub fn join(base: &str, reference: &str) -> String {
    if let Ok(base_url) = Url::parse(base) {
        if let Ok(joined) = base_url.join(reference) {
            return joined.to_string();
        }
    }

    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }

    if let Some(fragment) = reference.strip_prefix('#') {
        let (absolute, _) = split(base);
        return format!("{}#{}", absolute, fragment);
    }

    reference.to_string()
}

/// Split a URI into its fragment-free part and its fragment, at the first `#`.
pub fn split(uri: &str) -> (&str, &str) {
    match uri.split_once('#') {
        Some((absolute, fragment)) => (absolute, fragment),
        None => (uri, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_absolute_base() {
        assert_eq!(
            join("http://example.com/a/b.json", "c.json"),
            "http://example.com/a/c.json"
        );
        assert_eq!(
            join("http://example.com/a/b.json", "#/definitions/x"),
            "http://example.com/a/b.json#/definitions/x"
        );
        assert_eq!(
            join("http://example.com/a/b.json", "http://other.org/s.json"),
            "http://other.org/s.json"
        );
        assert_eq!(
            join("http://example.com/a/b.json", "sub/"),
            "http://example.com/a/sub/"
        );
    }

    #[test]
    fn test_join_empty_base() {
        assert_eq!(join("", "#/definitions/x"), "#/definitions/x");
        assert_eq!(join("", "#"), "#");
        assert_eq!(join("", "http://example.com/s.json"), "http://example.com/s.json");
    }

    #[test]
    fn test_split() {
        assert_eq!(
            split("https://website.org/a/b/c?q=1#h2"),
            ("https://website.org/a/b/c?q=1", "h2")
        );
        assert_eq!(
            split("https://website.org/a/b/c?q=1"),
            ("https://website.org/a/b/c?q=1", "")
        );
        assert_eq!(split("#h2"), ("", "h2"));
        assert_eq!(split(""), ("", ""));
    }
}

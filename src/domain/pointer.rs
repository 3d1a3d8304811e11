//! RFC 6901 JSON Pointer evaluation, including the URI-fragment form used by
//! `$ref` (`#/definitions/foo`, percent-encoded).

use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Split a JSON Pointer into its reference tokens.
///
/// Accepts both the plain form (`/foo/0`) and the fragment form (`#/foo/0`),
/// percent-decoding the latter. The empty pointer and `#` address the whole
/// document and yield no tokens.
pub fn parse(pointer: &str) -> Vec<String> {
    if pointer.is_empty() || pointer == "#" {
        return Vec::new();
    }

    let decoded = percent_decode_str(pointer).decode_utf8_lossy();
    let mut rest: &str = &decoded;
    rest = rest.strip_prefix('#').unwrap_or(rest);
    rest = rest.strip_prefix('/').unwrap_or(rest);

    rest.split('/')
        // RFC 6901 requires ~1 before ~0 so that "~01" becomes "~1", not "/".
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Walk `doc` by reference tokens. `None` means the pointer does not resolve,
/// which is distinct from resolving to a JSON `null`.
pub fn evaluate_tokens<'a>(doc: &'a Value, tokens: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for token in tokens {
        current = match current {
            Value::Object(map) => map.get(token.as_str())?,
            Value::Array(items) => {
                if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
                    items.get(token.parse::<usize>().ok()?)?
                } else {
                    return None;
                }
            }
            _ => return None,
        };
    }
    Some(current)
}

pub fn evaluate<'a>(doc: &'a Value, pointer: &str) -> Option<&'a Value> {
    evaluate_tokens(doc, &parse(pointer))
}

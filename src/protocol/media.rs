//! Content-Type gating.
//!
//! Embedding is a JSON-only enhancement. A response is eligible when its media type is
//! `application/json` or any structured `application/*+json` type such as
//! `application/hal+json`. Parameters (`; charset=utf-8`) and case are ignored.

use http::header::CONTENT_TYPE;
use http::HeaderMap;

/// Whether the `Content-Type` header of `headers` denotes JSON.
///
/// A missing or non-UTF-8 header is not JSON.
///
/// # Examples
///
/// ```
/// use hal_embed::protocol::is_json;
/// use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// assert!(!is_json(&headers));
///
/// headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/hal+json; charset=utf-8"));
/// assert!(is_json(&headers));
/// ```
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_media_type)
}

/// Whether a raw `Content-Type` value denotes JSON.
pub fn is_json_media_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        assert!(is_json_media_type("application/json"));
    }

    #[test]
    fn test_json_with_parameters_and_case() {
        assert!(is_json_media_type("Application/JSON ; charset=UTF-8"));
    }

    #[test]
    fn test_structured_suffix() {
        assert!(is_json_media_type("application/hal+json"));
        assert!(is_json_media_type("application/problem+json"));
    }

    #[test]
    fn test_non_json() {
        assert!(!is_json_media_type("application/xml"));
        assert!(!is_json_media_type("text/json-ish"));
        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("json"));
        assert!(!is_json_media_type(""));
    }

    #[test]
    fn test_missing_header() {
        assert!(!is_json(&HeaderMap::new()));
    }
}

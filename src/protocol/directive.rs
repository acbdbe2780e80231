//! Embedding directive parsing.
//!
//! A directive is carried in a single query parameter (`with` by default) whose value is
//! a delimiter-separated chain of relation names, consumed left to right, one per level
//! of embedding:
//!
//! ```text
//! GET /pen?with=next.next.next
//!            └──┬──────────┘
//!               [next, next, next]
//! ```
//!
//! Extraction also yields the request target with the directive removed, which is what
//! actually goes over the wire. Other query parameters keep their order and their exact
//! original encoding.

use crate::error::{EmbedError, Result};
use http::uri::PathAndQuery;
use http::Uri;
use url::form_urlencoded;

/// An ordered, non-empty chain of relation names.
///
/// Tokens are kept verbatim, so `a..b` yields an empty middle token. An empty token
/// never matches a link and surfaces later as an embedded error document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedDirective {
    relations: Vec<String>,
}

impl EmbedDirective {
    /// Split a raw directive value into relation names.
    ///
    /// Returns `None` for an empty value, which disables embedding.
    ///
    /// # Examples
    ///
    /// ```
    /// use hal_embed::protocol::EmbedDirective;
    ///
    /// let directive = EmbedDirective::parse("author.avatar", '.').unwrap();
    /// assert_eq!(directive.relations(), ["author", "avatar"]);
    ///
    /// assert!(EmbedDirective::parse("", '.').is_none());
    /// ```
    pub fn parse(value: &str, delimiter: char) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(EmbedDirective {
            relations: value.split(delimiter).map(str::to_string).collect(),
        })
    }

    /// Read the directive out of `uri` and return it with the stripped target.
    ///
    /// When the parameter is absent or empty the original URI is returned untouched.
    /// Every occurrence of the parameter is removed; the first one supplies the value.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::InvalidUri`] if the stripped target cannot be rebuilt.
    pub fn extract(uri: &Uri, param: &str, delimiter: char) -> Result<(Option<Self>, Uri)> {
        let Some(query) = uri.query() else {
            return Ok((None, uri.clone()));
        };

        let mut value = None;
        let mut kept = Vec::new();

        for pair in query.split('&') {
            match form_urlencoded::parse(pair.as_bytes()).next() {
                Some((key, val)) if key == param => {
                    if value.is_none() {
                        value = Some(val.into_owned());
                    }
                }
                _ => kept.push(pair),
            }
        }

        let Some(directive) = value.and_then(|v| Self::parse(&v, delimiter)) else {
            return Ok((None, uri.clone()));
        };

        let path_and_query = if kept.is_empty() {
            uri.path().to_string()
        } else {
            format!("{}?{}", uri.path(), kept.join("&"))
        };

        let mut parts = uri.clone().into_parts();
        parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>()?);
        let stripped = Uri::from_parts(parts).map_err(|e| EmbedError::InvalidUri(e.to_string()))?;

        Ok((Some(directive), stripped))
    }

    /// Relation names in consumption order.
    #[inline]
    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    /// Number of relations, i.e. the maximum embedding depth.
    #[inline]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Always `false`; an empty directive is represented as `None`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(uri: &str) -> (Option<EmbedDirective>, Uri) {
        EmbedDirective::extract(&uri.parse().unwrap(), "with", '.').unwrap()
    }

    #[test]
    fn test_no_query_is_passthrough() {
        let (directive, target) = extract("/pen");
        assert!(directive.is_none());
        assert_eq!(target, "/pen");
    }

    #[test]
    fn test_query_without_directive_is_untouched() {
        let (directive, target) = extract("/pen?b=2&a=1");
        assert!(directive.is_none());
        assert_eq!(target, "/pen?b=2&a=1");
    }

    #[test]
    fn test_empty_directive_is_ignored() {
        let (directive, target) = extract("/pen?with=&a=1");
        assert!(directive.is_none());
        assert_eq!(target, "/pen?with=&a=1");
    }

    #[test]
    fn test_directive_is_split_and_stripped() {
        let (directive, target) = extract("/pen?with=next.next.next");
        assert_eq!(directive.unwrap().relations(), ["next", "next", "next"]);
        assert_eq!(target, "/pen");
    }

    #[test]
    fn test_other_params_keep_order_and_encoding() {
        let (directive, target) = extract("/items?z=1&with=author&q=a%20b&a=2");
        assert_eq!(directive.unwrap().relations(), ["author"]);
        assert_eq!(target, "/items?z=1&q=a%20b&a=2");
    }

    #[test]
    fn test_encoded_directive_value() {
        let (directive, _) = extract("/items?with=author%2Eavatar");
        assert_eq!(directive.unwrap().relations(), ["author", "avatar"]);
    }

    #[test]
    fn test_empty_tokens_are_kept() {
        let (directive, _) = extract("/items?with=a..b");
        assert_eq!(directive.unwrap().relations(), ["a", "", "b"]);
    }

    #[test]
    fn test_repeated_param_first_wins_all_removed() {
        let (directive, target) = extract("/items?with=a&x=1&with=b");
        assert_eq!(directive.unwrap().relations(), ["a"]);
        assert_eq!(target, "/items?x=1");
    }

    #[test]
    fn test_absolute_uri_keeps_authority() {
        let (directive, target) = extract("http://api.example.com/pen?with=next");
        assert_eq!(directive.unwrap().len(), 1);
        assert_eq!(target, "http://api.example.com/pen");
    }

    #[test]
    fn test_custom_param_and_delimiter() {
        let uri: Uri = "/pen?embed=a,b".parse().unwrap();
        let (directive, target) = EmbedDirective::extract(&uri, "embed", ',').unwrap();
        assert_eq!(directive.unwrap().relations(), ["a", "b"]);
        assert_eq!(target, "/pen");
    }
}

//! Recursive link resolution.
//!
//! Given a document and a chain of relation names, the resolver follows the first
//! relation's link, fetches the target, resolves the fetched document against the rest
//! of the chain, and embeds the result under the relation name:
//!
//! ```text
//! pen ──next──▶ pineapple ──next──▶ apple ──next──▶ pen
//!
//! with=next.next.next
//!
//! pen { _embedded.next: pineapple { _embedded.next: apple { _embedded.next: pen } } }
//! ```
//!
//! Each level consumes exactly one relation, so depth is bounded by the chain length no
//! matter what the link graph looks like. Cycles simply revisit documents.
//!
//! Failures at one level stop descent at that level and are embedded as an error
//! document under `errors`:
//!
//! | Situation | Embedded |
//! |-----------|----------|
//! | Relation absent from `_links` | error with `about: ""` |
//! | Href is not a valid URI | error with `about: <href>` |
//! | Non-success status | error with `about: <href>` |
//! | JSON content type, body not a HAL document | error with `about: <href>` |
//! | Non-JSON content type | raw body as a string under the relation |
//!
//! Only a transport error (no response at all) aborts resolution.

use super::transport::Transport;
use crate::error::Result;
use crate::protocol::{is_json, resolve_href};
use crate::types::{Document, Embedded, ErrorDocument};
use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use http::{HeaderMap, Method, Request, Uri};
use serde_json::Value;
use tracing::{debug, warn};

/// Resolves relation chains against a [`Transport`].
///
/// Holds nothing but the transport and the headers to send, so one resolver can serve
/// any number of independent resolutions.
pub struct Resolver<'a, T: ?Sized> {
    transport: &'a T,
    headers: HeaderMap,
}

impl<'a, T: Transport + ?Sized> Resolver<'a, T> {
    /// Create a resolver fetching through `transport` with no extra headers.
    pub fn new(transport: &'a T) -> Self {
        Resolver {
            transport,
            headers: HeaderMap::new(),
        }
    }

    /// Send `headers` on every fetch.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Embed the resources reached by following `relations` from `document`.
    ///
    /// `base` is the URI `document` was fetched from; relative hrefs are resolved
    /// against it. An empty chain returns `document` unchanged.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if a fetch produced no response. Every other
    /// failure is embedded in the returned document.
    pub async fn resolve(&self, document: Document, base: &Uri, relations: &[String]) -> Result<Document> {
        self.resolve_level(document, base.clone(), relations, 0).await
    }

    fn resolve_level<'s>(
        &'s self,
        document: Document,
        base: Uri,
        relations: &'s [String],
        depth: usize,
    ) -> BoxFuture<'s, Result<Document>> {
        async move {
            let Some((relation, rest)) = relations.split_first() else {
                return Ok(document);
            };

            let Some(href) = document.link(relation).map(|link| link.href.clone()) else {
                warn!(relation = %relation, depth, "relation not found in _links");
                return Ok(document.with_errors(vec![ErrorDocument::unresolved("")]));
            };

            let target = match resolve_href(&base, &href) {
                Ok(target) => target,
                Err(e) => {
                    warn!(relation = %relation, href = %href, depth, error = %e, "unusable href");
                    return Ok(document.with_errors(vec![ErrorDocument::unresolved(href)]));
                }
            };

            debug!(relation = %relation, target = %target, depth, "fetching linked resource");
            let response = self.transport.round_trip(self.request(&target)?).await?;

            if !response.status().is_success() {
                warn!(
                    relation = %relation,
                    target = %target,
                    status = response.status().as_u16(),
                    depth,
                    "linked resource not available"
                );
                return Ok(document.with_errors(vec![ErrorDocument::unresolved(href)]));
            }

            if !is_json(response.headers()) {
                debug!(relation = %relation, target = %target, depth, "embedding non-JSON body as text");
                let text = String::from_utf8_lossy(response.body()).into_owned();
                return Ok(document.with_embedded(relation.as_str(), Embedded::Raw(Value::String(text))));
            }

            let child = match Document::parse(response.body()) {
                Ok(child) => child,
                Err(e) => {
                    warn!(relation = %relation, target = %target, depth, error = %e, "linked resource is not a HAL document");
                    return Ok(document.with_errors(vec![ErrorDocument::unresolved(href)]));
                }
            };

            let child = self.resolve_level(child, target, rest, depth + 1).await?;
            Ok(document.with_embedded(relation.as_str(), child))
        }
        .boxed()
    }

    fn request(&self, target: &Uri) -> Result<Request<Bytes>> {
        let mut request = Request::builder()
            .method(Method::GET)
            .uri(target.clone())
            .body(Bytes::new())?;
        *request.headers_mut() = self.headers.clone();
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryTransport;
    use crate::types::Link;
    use http::header::{ACCEPT, AUTHORIZATION};
    use http::{HeaderValue, Response};
    use parking_lot::Mutex;

    fn chain(relations: &[&str]) -> Vec<String> {
        relations.iter().map(|r| r.to_string()).collect()
    }

    fn base() -> Uri {
        "/root".parse().unwrap()
    }

    #[tokio::test]
    async fn test_empty_chain_returns_document_unchanged() {
        let transport = MemoryTransport::new();
        let doc = Document::new().with_link("next", Link::new("/next"));
        let resolved = Resolver::new(&transport)
            .resolve(doc.clone(), &base(), &[])
            .await
            .unwrap();
        assert_eq!(resolved, doc);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_relation_embeds_error_without_fetch() {
        let transport = MemoryTransport::new();
        let doc = Document::new().with_link("self", Link::new("/root"));
        let resolved = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["next", "next"]))
            .await
            .unwrap();
        assert_eq!(resolved.errors(), [ErrorDocument::unresolved("")]);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_embeds_error_with_href() {
        let transport = MemoryTransport::new();
        let doc = Document::new().with_link("next", Link::new("/gone"));
        let resolved = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["next"]))
            .await
            .unwrap();
        assert_eq!(resolved.errors(), [ErrorDocument::unresolved("/gone")]);
        assert!(resolved.embedded("next").is_none());
    }

    #[tokio::test]
    async fn test_error_stops_descent_at_failing_level() {
        let transport = MemoryTransport::new().with_json("/a", r#"{"_links":{}}"#);
        let doc = Document::new().with_link("next", Link::new("/a"));
        let resolved = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["next", "next", "next"]))
            .await
            .unwrap();

        assert!(resolved.errors().is_empty());
        let a = resolved.embedded("next").unwrap().as_document().unwrap();
        assert_eq!(a.errors(), [ErrorDocument::unresolved("")]);
        assert_eq!(transport.calls(), ["/a"]);
    }

    #[tokio::test]
    async fn test_non_json_nested_resource_is_embedded_as_text() {
        let transport = MemoryTransport::new().with_body("/note", "text/plain", "hello");
        let doc = Document::new().with_link("note", Link::new("/note"));
        let resolved = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["note", "more"]))
            .await
            .unwrap();
        assert_eq!(
            resolved.embedded("note"),
            Some(&Embedded::Raw(Value::String("hello".into())))
        );
        assert_eq!(transport.calls(), ["/note"]);
    }

    #[tokio::test]
    async fn test_unparseable_json_resource_embeds_error() {
        let transport = MemoryTransport::new().with_json("/bad", "[1, 2, 3]");
        let doc = Document::new().with_link("next", Link::new("/bad"));
        let resolved = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["next"]))
            .await
            .unwrap();
        assert_eq!(resolved.errors(), [ErrorDocument::unresolved("/bad")]);
    }

    #[tokio::test]
    async fn test_invalid_href_embeds_error() {
        let transport = MemoryTransport::new();
        let doc = Document::new().with_link("next", Link::new("not a uri"));
        let resolved = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["next"]))
            .await
            .unwrap();
        assert_eq!(resolved.errors(), [ErrorDocument::unresolved("not a uri")]);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = MemoryTransport::new().with_failure("/down");
        let doc = Document::new().with_link("next", Link::new("/down"));
        let result = Resolver::new(&transport)
            .resolve(doc, &base(), &chain(&["next"]))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_relative_hrefs_follow_fetched_uri() {
        let transport = MemoryTransport::new()
            .with_json("http://h.example/a/b", r#"{"_links":{"up":{"href":"../c"}}}"#)
            .with_json("http://h.example/c", r#"{"name":"c"}"#);
        let doc = Document::new().with_link("child", Link::new("a/b"));
        let base: Uri = "http://h.example/root".parse().unwrap();

        Resolver::new(&transport)
            .resolve(doc, &base, &chain(&["child", "up"]))
            .await
            .unwrap();
        assert_eq!(transport.calls(), ["http://h.example/a/b", "http://h.example/c"]);
    }

    struct HeaderRecorder {
        seen: Mutex<Vec<HeaderMap>>,
    }

    #[async_trait::async_trait]
    impl Transport for HeaderRecorder {
        async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
            assert_eq!(*request.method(), Method::GET);
            self.seen.lock().push(request.headers().clone());
            let mut response = Response::new(Bytes::from_static(b"{}"));
            response
                .headers_mut()
                .insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Ok(response)
        }
    }

    #[tokio::test]
    async fn test_headers_are_sent_on_each_fetch() {
        let transport = HeaderRecorder {
            seen: Mutex::new(Vec::new()),
        };
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/hal+json"));

        let doc = Document::new().with_link("next", Link::new("/n"));
        Resolver::new(&transport)
            .with_headers(headers.clone())
            .resolve(doc, &base(), &chain(&["next"]))
            .await
            .unwrap();

        assert_eq!(*transport.seen.lock(), vec![headers]);
    }
}

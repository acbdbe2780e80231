//! The embedding transport.
//!
//! [`EmbedTransport`] decorates any [`Transport`]. For each request it:
//!
//! 1. forwards anything that is not a `GET` untouched;
//! 2. looks for the embedding directive and, if there is none, forwards the request
//!    untouched and returns the inner response verbatim;
//! 3. otherwise fetches the directive-stripped target;
//! 4. returns non-success and non-JSON responses untouched;
//! 5. otherwise resolves the relation chain and answers `200 OK` with the original
//!    headers and the re-serialized, expanded document. The body is framed by a fresh
//!    `Content-Length`, so any `Transfer-Encoding` of the root response is dropped.
//!
//! Nested fetches carry the caller's headers, minus the root-only ones (`Host`, body
//! framing, conditional validators and `Range`).
//!
//! # Examples
//!
//! ```
//! use hal_embed::client::{EmbedTransport, MemoryTransport, Transport};
//! use bytes::Bytes;
//! use http::Request;
//!
//! let transport = MemoryTransport::new()
//!     .with_json("/pen", r#"{"_links":{"next":{"href":"/apple"}}}"#)
//!     .with_json("/apple", r#"{"name":"apple"}"#);
//! let embed = EmbedTransport::new(transport);
//!
//! let request = Request::get("/pen?with=next").body(Bytes::new()).unwrap();
//! let response = tokio_test::block_on(embed.round_trip(request)).unwrap();
//!
//! assert_eq!(
//!     response.body(),
//!     r#"{"_embedded":{"next":{"name":"apple"}},"_links":{"next":{"href":"/apple"}}}"#
//! );
//! ```

use super::config::EmbedConfig;
use super::resolver::Resolver;
use super::transport::Transport;
use crate::error::Result;
use crate::protocol::{is_json, EmbedDirective};
use crate::types::Document;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{
    HeaderName, CONTENT_LENGTH, CONTENT_TYPE, HOST, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH,
    IF_RANGE, IF_UNMODIFIED_SINCE, RANGE, TRANSFER_ENCODING,
};
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Headers that describe the root request only and are never sent to linked resources.
///
/// Validators and ranges target one representation; applied to a linked resource they
/// turn a present resource into a `304`, `412` or `206`.
const ROOT_ONLY_HEADERS: [HeaderName; 9] = [
    HOST,
    CONTENT_LENGTH,
    CONTENT_TYPE,
    IF_NONE_MATCH,
    IF_MODIFIED_SINCE,
    IF_MATCH,
    IF_UNMODIFIED_SINCE,
    IF_RANGE,
    RANGE,
];

/// A [`Transport`] that embeds linked HAL resources on request.
///
/// Cheap to clone; clones share the inner transport.
pub struct EmbedTransport<T: ?Sized> {
    pub(super) config: Arc<EmbedConfig>,
    pub(super) inner: Arc<T>,
}

impl<T: ?Sized> Clone for EmbedTransport<T> {
    fn clone(&self) -> Self {
        EmbedTransport {
            config: Arc::clone(&self.config),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> EmbedTransport<T> {
    /// Wrap `inner` with the default configuration (`with` parameter, `.` delimiter).
    pub fn new(inner: T) -> Self {
        EmbedTransport {
            config: Arc::new(EmbedConfig::default()),
            inner: Arc::new(inner),
        }
    }

    /// Wrap `inner` with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Config`](crate::EmbedError::Config) if the configuration
    /// is invalid.
    pub fn with_config(inner: T, config: EmbedConfig) -> Result<Self> {
        config.validate()?;
        Ok(EmbedTransport {
            config: Arc::new(config),
            inner: Arc::new(inner),
        })
    }
}

impl<T: ?Sized> EmbedTransport<T> {
    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The embedding configuration.
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    fn forwarded_headers(&self, headers: &HeaderMap) -> HeaderMap {
        if !self.config.forward_headers {
            return HeaderMap::new();
        }
        let mut forwarded = headers.clone();
        for name in &ROOT_ONLY_HEADERS {
            forwarded.remove(name);
        }
        forwarded
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for EmbedTransport<T> {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        if *request.method() != Method::GET {
            return self.inner.round_trip(request).await;
        }

        let (directive, target) =
            EmbedDirective::extract(request.uri(), &self.config.query_param, self.config.delimiter)?;
        let Some(directive) = directive else {
            return self.inner.round_trip(request).await;
        };

        debug!(target = %target, relations = ?directive.relations(), "embedding requested");

        let (mut parts, body) = request.into_parts();
        parts.uri = target.clone();
        let headers = self.forwarded_headers(&parts.headers);

        let response = self.inner.round_trip(Request::from_parts(parts, body)).await?;

        if !response.status().is_success() {
            debug!(target = %target, status = response.status().as_u16(), "root not successful, passing through");
            return Ok(response);
        }
        if !is_json(response.headers()) {
            debug!(target = %target, "root is not JSON, passing through");
            return Ok(response);
        }

        let document = match Document::parse(response.body()) {
            Ok(document) => document,
            Err(e) => {
                warn!(target = %target, error = %e, "root is not a HAL document, passing through");
                return Ok(response);
            }
        };

        let resolved = Resolver::new(&*self.inner)
            .with_headers(headers)
            .resolve(document, &target, directive.relations())
            .await?;
        let body = resolved.to_bytes()?;

        let (mut parts, _) = response.into_parts();
        parts.status = StatusCode::OK;
        parts.headers.remove(TRANSFER_ENCODING);
        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        Ok(Response::from_parts(parts, body))
    }
}

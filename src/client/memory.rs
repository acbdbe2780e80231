//! In-memory transport.
//!
//! Serves canned responses keyed by the exact request target and records every target it
//! is asked for, in order. Useful for exercising embedding without a network:
//!
//! ```
//! use hal_embed::client::{EmbedTransport, MemoryTransport, Transport};
//! use bytes::Bytes;
//! use http::Request;
//!
//! let transport = MemoryTransport::new()
//!     .with_json("/foo", r#"{"_links":{"bar":{"href":"/bar"}}}"#);
//! let embed = EmbedTransport::new(transport);
//!
//! let request = Request::get("/foo?with=bar").body(Bytes::new()).unwrap();
//! let response = tokio_test::block_on(embed.round_trip(request)).unwrap();
//!
//! assert_eq!(embed.inner().calls(), ["/foo", "/bar"]);
//! assert!(response.body().starts_with(br#"{"_embedded":{"errors":"#));
//! ```

use super::transport::Transport;
use crate::error::{EmbedError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Request, Response, StatusCode};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
struct Resource {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

/// A [`Transport`] answering from a fixed table of resources.
///
/// Unknown targets get an empty `404 Not Found`.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    resources: HashMap<String, Resource>,
    failures: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MemoryTransport {
    /// Create a transport with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` as `application/json` at `target`.
    pub fn with_json(self, target: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.with_body(target, "application/json", body)
    }

    /// Serve `body` with the given content type at `target`.
    pub fn with_body(
        self,
        target: impl Into<String>,
        content_type: &'static str,
        body: impl Into<Bytes>,
    ) -> Self {
        self.with_status(target, StatusCode::OK, content_type, body)
    }

    /// Serve `body` with an explicit status at `target`.
    pub fn with_status(
        mut self,
        target: impl Into<String>,
        status: StatusCode,
        content_type: &'static str,
        body: impl Into<Bytes>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.resources.insert(
            target.into(),
            Resource {
                status,
                headers,
                body: body.into(),
            },
        );
        self
    }

    /// Fail every request for `target` with a transport error.
    pub fn with_failure(mut self, target: impl Into<String>) -> Self {
        self.failures.insert(target.into());
        self
    }

    /// Targets requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let target = request.uri().to_string();
        self.calls.lock().push(target.clone());

        if self.failures.contains(&target) {
            return Err(EmbedError::Connect(format!("connection refused: {}", target)));
        }

        let mut response = Response::new(Bytes::new());
        match self.resources.get(&target) {
            Some(resource) => {
                *response.status_mut() = resource.status;
                *response.headers_mut() = resource.headers.clone();
                *response.body_mut() = resource.body.clone();
            }
            None => *response.status_mut() = StatusCode::NOT_FOUND,
        }
        Ok(response)
    }
}

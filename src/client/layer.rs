//! `tower` integration.
//!
//! [`EmbedLayer`] wraps a [`Transport`] into an [`EmbedTransport`], which also implements
//! [`tower::Service`], so embedding can sit in a `tower` client stack.

use super::config::EmbedConfig;
use super::embed::EmbedTransport;
use super::transport::Transport;
use crate::error::{EmbedError, Result};
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// A [`Layer`] producing [`EmbedTransport`]s.
#[derive(Clone, Debug, Default)]
pub struct EmbedLayer {
    config: Arc<EmbedConfig>,
}

impl EmbedLayer {
    /// Create a layer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Config`] if the configuration is invalid.
    pub fn with_config(config: EmbedConfig) -> Result<Self> {
        config.validate()?;
        Ok(EmbedLayer {
            config: Arc::new(config),
        })
    }
}

impl<T: Transport> Layer<T> for EmbedLayer {
    type Service = EmbedTransport<T>;

    fn layer(&self, inner: T) -> Self::Service {
        EmbedTransport {
            config: Arc::clone(&self.config),
            inner: Arc::new(inner),
        }
    }
}

impl<T: Transport + ?Sized + 'static> Service<Request<Bytes>> for EmbedTransport<T> {
    type Response = Response<Bytes>;
    type Error = EmbedError;
    type Future = BoxFuture<'static, Result<Response<Bytes>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let this = self.clone();
        Box::pin(async move { this.round_trip(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryTransport;
    use http::StatusCode;
    use std::future::poll_fn;

    #[tokio::test]
    async fn test_layer_builds_embedding_service() {
        let transport = MemoryTransport::new()
            .with_json("/a", r#"{"_links":{"b":{"href":"/b"}}}"#)
            .with_json("/b", r#"{"id":"b"}"#);
        let mut service = EmbedLayer::new().layer(transport);

        poll_fn(|cx| service.poll_ready(cx)).await.unwrap();
        let request = Request::get("/a?with=b").body(Bytes::new()).unwrap();
        let response = service.call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.body(),
            r#"{"_embedded":{"b":{"id":"b"}},"_links":{"b":{"href":"/b"}}}"#
        );
        assert_eq!(service.inner().calls(), ["/a", "/b"]);
    }

    #[test]
    fn test_layer_rejects_invalid_config() {
        let config = EmbedConfig {
            query_param: String::new(),
            ..Default::default()
        };
        assert!(EmbedLayer::with_config(config).is_err());
    }

    #[tokio::test]
    async fn test_layer_uses_configured_parameter() {
        let config = EmbedConfig {
            query_param: "embed".into(),
            ..Default::default()
        };
        let transport = MemoryTransport::new()
            .with_json("/a", r#"{"_links":{"b":{"href":"/b"}}}"#)
            .with_json("/b", "{}");
        let embed = EmbedLayer::with_config(config).unwrap().layer(transport);

        let request = Request::get("/a?embed=b").body(Bytes::new()).unwrap();
        embed.round_trip(request).await.unwrap();
        assert_eq!(embed.inner().calls(), ["/a", "/b"]);
    }
}

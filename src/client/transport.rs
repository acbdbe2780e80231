//! The transport capability.
//!
//! A [`Transport`] performs exactly one HTTP exchange. It is the only thing the embedding
//! core needs from the outside world; connection pooling, TLS, redirects, timeouts and
//! retries are all the transport's business.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use std::sync::Arc;

/// Perform one HTTP request and return the full response.
///
/// Implementations return `Err` only when no response exists at all (connection
/// failure, timeout). Non-success statuses are ordinary responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and read the whole response body.
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        (**self).round_trip(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        (**self).round_trip(request).await
    }
}

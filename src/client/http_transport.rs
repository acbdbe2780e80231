//! reqwest-backed transport.
//!
//! [`HttpTransport`] is the production [`Transport`]: it sends requests with a pooled
//! `reqwest` client and retries transient failures with exponential backoff. Retrying
//! lives here, never in the embedding core.
//!
//! # Examples
//!
//! ```ignore
//! use hal_embed::client::{ClientConfig, EmbedTransport, HttpTransport, Transport};
//! use bytes::Bytes;
//! use http::Request;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig {
//!         base_url: Some("https://api.example.com".into()),
//!         ..Default::default()
//!     };
//!     let embed = EmbedTransport::new(HttpTransport::with_config(config)?);
//!
//!     let request = Request::get("/orders/1?with=customer.address").body(Bytes::new())?;
//!     let response = embed.round_trip(request).await?;
//!     println!("{}", String::from_utf8_lossy(response.body()));
//!     Ok(())
//! }
//! ```

use super::config::ClientConfig;
use super::transport::Transport;
use super::utils::{exponential_backoff, is_retryable_status};
use crate::error::{EmbedError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http::request::Parts;
use http::{Request, Response, Uri};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// A [`Transport`] sending real HTTP requests.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Option<Url>,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Config`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Config`] for an invalid `proxy_url` or `base_url`, or if
    /// the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url)
                .map_err(|e| EmbedError::Config(format!("invalid proxy_url: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| EmbedError::Config(format!("cannot build HTTP client: {}", e)))?;

        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| EmbedError::Config(format!("invalid base_url: {}", e)))?;

        Ok(HttpTransport {
            client,
            base_url,
            config: Arc::new(config),
        })
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a request target.
    fn target_url(&self, uri: &Uri) -> Result<Url> {
        if uri.scheme().is_some() {
            return Ok(Url::parse(&uri.to_string())?);
        }
        match &self.base_url {
            Some(base) => Ok(base.join(&uri.to_string())?),
            None => Err(EmbedError::InvalidUri(format!(
                "{} has no origin and no base_url is configured",
                uri
            ))),
        }
    }

    async fn send_once(&self, parts: &Parts, url: Url, body: Bytes) -> Result<Response<Bytes>> {
        let mut req_builder = self
            .client
            .request(parts.method.clone(), url)
            .headers(parts.headers.clone());
        if !body.is_empty() {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let (parts, body) = request.into_parts();
        let url = self.target_url(&parts.uri)?;
        let mut attempt = 0;

        loop {
            let retry_reason = match self.send_once(&parts, url.clone(), body.clone()).await {
                Ok(response)
                    if is_retryable_status(response.status().as_u16())
                        && attempt < self.config.max_retries =>
                {
                    response.status().to_string()
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => e.to_string(),
                Err(e) => return Err(e),
            };

            let delay = exponential_backoff(attempt, self.config.retry_delay_ms);
            if self.config.enable_logging {
                tracing::warn!(
                    "Request to {} failed (attempt {}), retrying after {:?}: {}",
                    url,
                    attempt + 1,
                    delay,
                    retry_reason
                );
            }
            sleep(delay).await;
            attempt += 1;
        }
    }
}

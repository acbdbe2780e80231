//! Configuration for the embedding transport and the bundled HTTP transport.
//!
//! # Configuration Options
//!
//! [`EmbedConfig`]:
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `query_param` | `"with"` | Query parameter carrying the directive |
//! | `delimiter` | `'.'` | Separator between relation names |
//! | `forward_headers` | `true` | Send the caller's headers on nested fetches |
//!
//! [`ClientConfig`]:
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `base_url` | `None` | Origin for origin-form targets such as `/pen` |
//! | `request_timeout_ms` | 30000 | Per-request timeout |
//! | `max_retries` | 3 | Maximum retry attempts |
//! | `retry_delay_ms` | 1000 | Base delay between retries |
//! | `pool_max_idle_per_host` | 32 | Idle connections kept per host |
//! | `proxy_url` | `""` | Proxy for all requests, empty for none |
//! | `enable_logging` | `true` | Log retries with `tracing` |
//!
//! Both structs deserialize with `serde`, missing keys falling back to the defaults:
//!
//! ```
//! use hal_embed::client::{ClientConfig, EmbedConfig};
//!
//! let config: ClientConfig = serde_json::from_str(r#"{"max_retries": 0}"#).unwrap();
//! assert_eq!(config.max_retries, 0);
//! assert_eq!(config.retry_delay_ms, 1000);
//!
//! let config: EmbedConfig = serde_json::from_str(r#"{"query_param": "embed"}"#).unwrap();
//! assert_eq!(config.delimiter, '.');
//! ```

use crate::error::{EmbedError, Result};
use crate::protocol::constants::{RELATION_DELIMITER, WITH_PARAM};
use serde::Deserialize;

/// Configuration for [`EmbedTransport`](super::EmbedTransport).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Query parameter carrying the embedding directive.
    pub query_param: String,

    /// Separator between relation names in the directive value.
    pub delimiter: char,

    /// Send the caller's request headers (minus `Host`, `Content-Length` and
    /// `Content-Type`) on every nested fetch.
    pub forward_headers: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            query_param: WITH_PARAM.to_string(),
            delimiter: RELATION_DELIMITER,
            forward_headers: true,
        }
    }
}

impl EmbedConfig {
    /// Check the configuration for values that could never match a query string.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Config`] if `query_param` is empty or contains `&`, `=`
    /// or `#`.
    pub fn validate(&self) -> Result<()> {
        if self.query_param.is_empty() {
            return Err(EmbedError::Config("query_param must not be empty".into()));
        }
        if self.query_param.contains(['&', '=', '#']) {
            return Err(EmbedError::Config(format!(
                "query_param {:?} contains a reserved character",
                self.query_param
            )));
        }
        Ok(())
    }
}

/// Configuration for [`HttpTransport`](super::HttpTransport).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin used for request targets without scheme and authority.
    pub base_url: Option<String>,

    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Maximum retries for transient failures.
    ///
    /// The delay uses exponential backoff: `delay = base * 2^attempt`.
    pub max_retries: u32,

    /// Base retry delay in milliseconds.
    pub retry_delay_ms: u64,

    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,

    /// Proxy URL, empty for none.
    pub proxy_url: String,

    /// Log retries through `tracing`.
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: 30_000,
            max_retries: 3,
            retry_delay_ms: 1000,
            pool_max_idle_per_host: 32,
            proxy_url: String::new(),
            enable_logging: true,
        }
    }
}

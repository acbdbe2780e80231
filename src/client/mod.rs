//! HTTP client side of HAL embedding.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── transport      - the Transport capability trait
//! ├── embed          - EmbedTransport, the embedding decorator
//! ├── resolver       - recursive relation-chain resolution
//! ├── layer          - tower Layer/Service integration
//! ├── http_transport - reqwest-backed transport with retries
//! ├── memory         - in-memory transport
//! ├── config         - EmbedConfig and ClientConfig
//! └── utils          - retry helpers
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Transport`] | One HTTP exchange, the only external capability |
//! | [`EmbedTransport`] | Decorator performing the embedding |
//! | [`Resolver`] | Follows a relation chain and composes documents |
//! | [`EmbedLayer`] | `tower::Layer` producing `EmbedTransport`s |
//! | [`HttpTransport`] | Real HTTP via `reqwest` |
//! | [`MemoryTransport`] | Canned responses, records requests |
//!
//! # Examples
//!
//! ```
//! use hal_embed::client::{is_retryable_status, exponential_backoff};
//! use std::time::Duration;
//!
//! assert!(is_retryable_status(503));
//! assert_eq!(exponential_backoff(2, 100), Duration::from_millis(400));
//! ```

mod config;
mod embed;
mod http_transport;
mod layer;
mod memory;
mod resolver;
mod transport;
mod utils;

pub use config::{ClientConfig, EmbedConfig};
pub use embed::EmbedTransport;
pub use http_transport::HttpTransport;
pub use layer::EmbedLayer;
pub use memory::MemoryTransport;
pub use resolver::Resolver;
pub use transport::Transport;
pub use utils::*;

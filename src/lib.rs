#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # HAL embedding over HTTP
//!
//! A client-side transport decorator for HAL (`_links` / `_embedded`) JSON APIs. A normal
//! `GET` carrying a `with` query parameter such as `with=author.avatar` is answered with
//! a single document in which the linked resources have already been fetched and folded
//! into `_embedded`, one level per relation name.
//!
//! ## Overview
//!
//! ```text
//! EmbedTransport ──▶ EmbedDirective::extract ──▶ root GET (inner Transport)
//!                                                   │
//!                        [GET, 2xx, JSON, directive present]
//!                                                   ▼
//!                        Resolver ──▶ GET per relation ──▶ Document / ErrorDocument
//!                                                   │
//!                                                   ▼
//!                                  Document::to_bytes ──▶ 200 OK
//! ```
//!
//! Anything else (non-`GET`, no directive, non-success status, non-JSON body) is passed
//! through untouched.
//!
//! ## Usage
//!
//! ```
//! use hal_embed::client::{EmbedTransport, MemoryTransport, Transport};
//! use bytes::Bytes;
//! use http::Request;
//!
//! # tokio_test::block_on(async {
//! let transport = MemoryTransport::new()
//!     .with_json("/pen", r#"{"_links":{"next":{"href":"/pineapple"}}}"#)
//!     .with_json("/pineapple", r#"{"_links":{"next":{"href":"/apple"}}}"#);
//! let embed = EmbedTransport::new(transport);
//!
//! let request = Request::get("/pen?with=next").body(Bytes::new()).unwrap();
//! let response = embed.round_trip(request).await.unwrap();
//!
//! assert_eq!(
//!     response.body(),
//!     r#"{"_embedded":{"next":{"_links":{"next":{"href":"/apple"}}}},"_links":{"next":{"href":"/pineapple"}}}"#
//! );
//! # });
//! ```
//!
//! ## Module Structure
//!
//! - **[error]** - Error type and result alias
//! - **[protocol]** - Directive parsing, content-type gating, href resolution
//! - **[types]** - HAL document model and error documents
//! - **[client]** - Transports, the resolver, and the embedding decorator

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{EmbedLayer, EmbedTransport, HttpTransport, MemoryTransport, Resolver, Transport};
pub use error::{EmbedError, Result};
pub use protocol::EmbedDirective;
pub use types::{Document, Embedded, ErrorDocument, Link, LinkRelation};

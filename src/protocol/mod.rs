//! Wire-level pieces of the embedding protocol.
//!
//! This module holds everything that deals with raw request targets, headers, and
//! well-known names, independently of how documents are composed:
//!
//! | Item | Description |
//! |------|-------------|
//! | [`constants`] | Query parameter, delimiter, and reserved HAL keys |
//! | [`EmbedDirective`] | Parsed `with=a.b.c` relation chain |
//! | [`is_json`] | Content-Type gating for embedding |
//! | [`resolve_href`] | Turn a link href into the URI of the next fetch |
//!
//! # Examples
//!
//! ```
//! use hal_embed::protocol::EmbedDirective;
//! use http::Uri;
//!
//! let uri: Uri = "/pen?page=2&with=next.next".parse().unwrap();
//! let (directive, target) = EmbedDirective::extract(&uri, "with", '.').unwrap();
//!
//! assert_eq!(directive.unwrap().relations(), ["next", "next"]);
//! assert_eq!(target, "/pen?page=2");
//! ```

pub mod constants;
mod directive;
mod href;
mod media;

pub use directive::EmbedDirective;
pub use href::resolve_href;
pub use media::{is_json, is_json_media_type};

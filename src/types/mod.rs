//! HAL document types.
//!
//! - [`Document`] - a JSON object with recognised `_links` and `_embedded` sections
//! - [`Embedded`] - one entry of an `_embedded` section
//! - [`Link`], [`LinkRelation`] - entries of a `_links` section
//! - [`ErrorDocument`] - the fixed-shape error embedded for unresolved relations

mod document;
mod error_document;
mod link;

pub use document::{Document, Embedded};
pub use error_document::{
    ErrorDocument, ErrorLinks, UNRESOLVED_DETAIL, UNRESOLVED_STATUS, UNRESOLVED_TITLE,
};
pub use link::{Link, LinkRelation};

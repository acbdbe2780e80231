//! Error documents for relations that could not be embedded.
//!
//! A failed relation never aborts the request. Instead an error document is embedded
//! under the reserved `errors` relation at the level where resolution stopped:
//!
//! ```text
//! {"_embedded":{"errors":[{"status":404,"title":"Error Response","detail":"Not Found","_links":{"about":"/bar"}}]}, ...}
//! ```
//!
//! Fields are emitted in the fixed order shown above.

use serde::{Deserialize, Serialize};

/// Status reported for every unresolved relation.
pub const UNRESOLVED_STATUS: u16 = 404;

/// Title reported for every unresolved relation.
pub const UNRESOLVED_TITLE: &str = "Error Response";

/// Detail reported for every unresolved relation.
pub const UNRESOLVED_DETAIL: &str = "Not Found";

/// A fixed-shape error object describing one relation that could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorDocument {
    /// HTTP-style status code.
    pub status: u16,
    /// Short summary.
    pub title: String,
    /// Human readable explanation.
    pub detail: String,
    /// Links; `about` points at the href that was attempted.
    #[serde(rename = "_links")]
    pub links: ErrorLinks,
}

/// Link section of an [`ErrorDocument`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorLinks {
    /// The href whose resolution failed; empty when the relation had no link at all.
    pub about: String,
}

impl ErrorDocument {
    /// Build the error document for a relation that could not be resolved.
    ///
    /// Used both when the relation is missing from `_links` (pass `""`) and when
    /// fetching an existing link did not succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hal_embed::types::ErrorDocument;
    ///
    /// let err = ErrorDocument::unresolved("/bar");
    /// assert_eq!(
    ///     serde_json::to_string(&err).unwrap(),
    ///     r#"{"status":404,"title":"Error Response","detail":"Not Found","_links":{"about":"/bar"}}"#
    /// );
    /// ```
    pub fn unresolved(attempted_href: impl Into<String>) -> Self {
        ErrorDocument {
            status: UNRESOLVED_STATUS,
            title: UNRESOLVED_TITLE.to_string(),
            detail: UNRESOLVED_DETAIL.to_string(),
            links: ErrorLinks {
                about: attempted_href.into(),
            },
        }
    }

    /// The href this error is about.
    #[inline]
    pub fn about(&self) -> &str {
        &self.links.about
    }
}

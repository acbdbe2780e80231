//! Link href resolution.
//!
//! Hrefs found in `_links` are usually server-relative (`/pineapple`). They are resolved
//! against the URI of the request that produced the document holding the link, so every
//! nested fetch reaches the same origin unless the href says otherwise.

use crate::error::Result;
use http::Uri;
use url::Url;

/// Resolve `href` against `base`.
///
/// An absolute `base` is joined per RFC 3986. An origin-form `base` (no scheme or
/// authority, e.g. `/pen`) carries no origin to join with, so `href` is used verbatim and
/// the transport decides how to reach it.
///
/// # Errors
///
/// Returns [`EmbedError::InvalidUri`](crate::EmbedError::InvalidUri) if the result is not
/// a valid URI.
///
/// # Examples
///
/// ```
/// use hal_embed::protocol::resolve_href;
///
/// let base = "https://api.example.com/fruits/pen?page=1".parse().unwrap();
/// assert_eq!(resolve_href(&base, "/pineapple").unwrap(), "https://api.example.com/pineapple");
/// assert_eq!(resolve_href(&base, "apple").unwrap(), "https://api.example.com/fruits/apple");
///
/// let base = "/pen".parse().unwrap();
/// assert_eq!(resolve_href(&base, "/pineapple").unwrap(), "/pineapple");
/// ```
pub fn resolve_href(base: &Uri, href: &str) -> Result<Uri> {
    if base.scheme().is_none() || base.authority().is_none() {
        return Ok(href.parse()?);
    }

    let joined = Url::parse(&base.to_string())?.join(href)?;
    Ok(joined.as_str().parse()?)
}

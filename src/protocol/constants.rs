//! Well-known names used on the wire.

/// Query parameter carrying the embedding directive.
pub const WITH_PARAM: &str = "with";

/// Separator between relation names inside the directive value.
pub const RELATION_DELIMITER: char = '.';

/// HAL link section key.
pub const LINKS: &str = "_links";

/// HAL embedded-resources section key.
pub const EMBEDDED: &str = "_embedded";

/// Reserved relation name under which error documents are embedded.
pub const ERRORS: &str = "errors";

/// Relation inside an error document's links pointing at the failed href.
pub const ABOUT: &str = "about";

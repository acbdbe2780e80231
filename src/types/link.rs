//! HAL link objects.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single HAL link object: an `href` plus any other link attributes
/// (`templated`, `title`, `type`, ...) carried through untouched.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Link {
    /// Target reference.
    pub href: String,

    /// Remaining link attributes.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Link {
    /// Create a link with only an `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Link {
            href: href.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add a link attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum LinkField<'a> {
    Href(&'a str),
    Attribute(&'a Value),
}

// Keys are emitted in lexicographic order, `href` included.
impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut fields: BTreeMap<&str, LinkField<'_>> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), LinkField::Attribute(v)))
            .collect();
        fields.insert("href", LinkField::Href(&self.href));
        serializer.collect_map(fields)
    }
}

/// The value of one relation in a `_links` section.
///
/// HAL allows a relation to hold either one link object or an array of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkRelation {
    /// A single link object.
    One(Link),
    /// An array of link objects.
    Many(Vec<Link>),
}

impl LinkRelation {
    /// The link followed when embedding: the only one, or the first of many.
    pub fn first(&self) -> Option<&Link> {
        match self {
            LinkRelation::One(link) => Some(link),
            LinkRelation::Many(links) => links.first(),
        }
    }
}

impl From<Link> for LinkRelation {
    fn from(link: Link) -> Self {
        LinkRelation::One(link)
    }
}

//! HAL document model.
//!
//! A [`Document`] is a JSON object split into three parts:
//!
//! | Part | Key | Representation |
//! |------|-----|----------------|
//! | Links | `_links` | relation → [`LinkRelation`] |
//! | Embedded resources | `_embedded` | relation → [`Embedded`] |
//! | Passthrough fields | anything else | opaque [`serde_json::Value`] |
//!
//! Serialization is deterministic: keys are emitted in lexicographic order at every
//! level, so `_embedded` sorts before `_links` and both sort among the passthrough
//! fields. Error documents are the one exception and keep their fixed field order.
//! As a consequence `serialize(parse(serialize(parse(body))))` equals
//! `serialize(parse(body))`.
//!
//! # Examples
//!
//! ```
//! use hal_embed::types::{Document, ErrorDocument};
//!
//! let doc = Document::parse(br#"{"name":"pen","_links":{"self":{"href":"/pen"}}}"#).unwrap();
//! assert_eq!(doc.link("self").unwrap().href, "/pen");
//!
//! let doc = doc.with_errors(vec![ErrorDocument::unresolved("/apple")]);
//! let body = doc.to_bytes().unwrap();
//! assert!(body.starts_with(br#"{"_embedded":{"errors":[{"status":404"#));
//! ```

use super::error_document::ErrorDocument;
use super::link::{Link, LinkRelation};
use crate::error::{EmbedError, Result};
use crate::protocol::constants::{EMBEDDED, ERRORS, LINKS};
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A HAL document.
///
/// Sections that were absent on the wire stay absent on output; a document that never
/// had anything embedded has no `_embedded` key at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    links: Option<BTreeMap<String, LinkRelation>>,
    embedded: Option<BTreeMap<String, Embedded>>,
    fields: BTreeMap<String, Value>,
}

/// The value of one relation in an `_embedded` section.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Embedded {
    /// A single nested document.
    Document(Box<Document>),
    /// An array of nested documents (a HAL collection).
    Collection(Vec<Document>),
    /// Error documents under the reserved `errors` relation.
    Errors(Vec<ErrorDocument>),
    /// Anything else, e.g. the raw text of a non-JSON linked resource.
    Raw(Value),
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Json`] for invalid JSON and [`EmbedError::Document`] if the
    /// value is not an object or its `_links`/`_embedded` sections are malformed.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Build a document from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn from_value(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(EmbedError::Document(format!(
                    "expected a JSON object, found {}",
                    kind(&other)
                )))
            }
        };
        let mut fields: BTreeMap<String, Value> = object.into_iter().collect();

        let links = fields
            .remove(LINKS)
            .map(|section| {
                serde_json::from_value(section)
                    .map_err(|e| EmbedError::Document(format!("invalid {} section: {}", LINKS, e)))
            })
            .transpose()?;

        let embedded = match fields.remove(EMBEDDED) {
            None => None,
            Some(Value::Object(section)) => Some(
                section
                    .into_iter()
                    .map(|(relation, value)| {
                        let child = Embedded::from_value(&relation, value);
                        (relation, child)
                    })
                    .collect(),
            ),
            Some(other) => {
                return Err(EmbedError::Document(format!(
                    "invalid {} section: expected an object, found {}",
                    EMBEDDED,
                    kind(&other)
                )))
            }
        };

        Ok(Document {
            links,
            embedded,
            fields,
        })
    }

    /// Encode the document as JSON with lexicographically ordered keys.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Json`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Add or replace a link.
    pub fn with_link(mut self, relation: impl Into<String>, link: impl Into<LinkRelation>) -> Self {
        self.links
            .get_or_insert_with(BTreeMap::new)
            .insert(relation.into(), link.into());
        self
    }

    /// Add or replace a passthrough field.
    ///
    /// The `_links` and `_embedded` keys are owned by their sections; a passthrough
    /// field with either name is shadowed on output.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Return this document with `child` embedded under `relation`.
    ///
    /// The `_embedded` section is created if needed and an existing entry for the same
    /// relation is replaced. Links and passthrough fields are left as they were.
    pub fn with_embedded(mut self, relation: impl Into<String>, child: impl Into<Embedded>) -> Self {
        self.embedded
            .get_or_insert_with(BTreeMap::new)
            .insert(relation.into(), child.into());
        self
    }

    /// Return this document with `errors` embedded under the reserved `errors` relation.
    pub fn with_errors(self, errors: Vec<ErrorDocument>) -> Self {
        self.with_embedded(ERRORS, Embedded::Errors(errors))
    }

    /// The link followed for `relation`, if any.
    pub fn link(&self, relation: &str) -> Option<&Link> {
        self.links.as_ref()?.get(relation)?.first()
    }

    /// The `_links` section, if present.
    pub fn links(&self) -> Option<&BTreeMap<String, LinkRelation>> {
        self.links.as_ref()
    }

    /// The embedded value for `relation`, if any.
    pub fn embedded(&self, relation: &str) -> Option<&Embedded> {
        self.embedded.as_ref()?.get(relation)
    }

    /// The `_embedded` section, if present.
    pub fn embedded_section(&self) -> Option<&BTreeMap<String, Embedded>> {
        self.embedded.as_ref()
    }

    /// Embedded error documents at this level.
    pub fn errors(&self) -> &[ErrorDocument] {
        match self.embedded(ERRORS) {
            Some(Embedded::Errors(errors)) => errors,
            _ => &[],
        }
    }

    /// A passthrough field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All passthrough fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl Embedded {
    /// Classify a decoded `_embedded` entry.
    ///
    /// Entries that do not fit a more specific variant are kept as [`Embedded::Raw`]
    /// rather than rejected, since they belong to the server and are passed through.
    pub fn from_value(relation: &str, value: Value) -> Self {
        match value {
            Value::Object(_) => match Document::from_value(value.clone()) {
                Ok(document) => Embedded::Document(Box::new(document)),
                Err(_) => Embedded::Raw(value),
            },
            Value::Array(_) if relation == ERRORS => {
                match serde_json::from_value::<Vec<ErrorDocument>>(value.clone()) {
                    Ok(errors) => Embedded::Errors(errors),
                    Err(_) => Self::collection_or_raw(value),
                }
            }
            Value::Array(_) => Self::collection_or_raw(value),
            other => Embedded::Raw(other),
        }
    }

    fn collection_or_raw(value: Value) -> Self {
        let documents = match &value {
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => items
                .iter()
                .cloned()
                .map(Document::from_value)
                .collect::<Result<Vec<_>>>()
                .ok(),
            _ => None,
        };
        match documents {
            Some(documents) => Embedded::Collection(documents),
            None => Embedded::Raw(value),
        }
    }

    /// The nested document, if this entry is one.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Embedded::Document(document) => Some(document),
            _ => None,
        }
    }
}

impl From<Document> for Embedded {
    fn from(document: Document) -> Self {
        Embedded::Document(Box::new(document))
    }
}

impl From<ErrorDocument> for Embedded {
    fn from(error: ErrorDocument) -> Self {
        Embedded::Errors(vec![error])
    }
}

impl From<Vec<ErrorDocument>> for Embedded {
    fn from(errors: Vec<ErrorDocument>) -> Self {
        Embedded::Errors(errors)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Section<'a> {
    Field(&'a Value),
    Links(&'a BTreeMap<String, LinkRelation>),
    Embedded(&'a BTreeMap<String, Embedded>),
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: BTreeMap<&str, Section<'_>> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), Section::Field(v)))
            .collect();
        if let Some(links) = &self.links {
            entries.insert(LINKS, Section::Links(links));
        }
        if let Some(embedded) = &self.embedded {
            entries.insert(EMBEDDED, Section::Embedded(embedded));
        }
        serializer.collect_map(entries)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

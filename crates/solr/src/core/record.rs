//! Record identity and score capabilities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::RecordId;

/// Where a record type keeps its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    /// Identity is the configured primary-key attribute (the common case).
    PrimaryKey,
    /// Identity comes from a document id accessor, as in document stores.
    DocumentId,
}

/// A record whose identifying value can be read.
///
/// Each record type declares which identity it uses through
/// [`Identifiable::IDENTITY`]; [`record_id`] dispatches on it.
pub trait Identifiable {
    /// The identity source for this record type.
    const IDENTITY: IdentityKind = IdentityKind::PrimaryKey;

    /// Reads an attribute as an identifier.
    fn attribute(&self, name: &str) -> Option<RecordId>;

    /// Returns the document id, for types using [`IdentityKind::DocumentId`].
    fn document_id(&self) -> Option<RecordId> {
        None
    }
}

/// A record that can carry the backend relevance score.
pub trait Scorable {
    /// Stores the score of the hit this record was resolved from.
    fn set_solr_score(&mut self, score: f64);

    /// Returns the stored score.
    fn solr_score(&self) -> Option<f64>;
}

/// Returns the identifying value of a record.
///
/// Reads the `primary_key` attribute, or the document id when the record type
/// declares [`IdentityKind::DocumentId`].
pub fn record_id<R: Identifiable>(record: &R, primary_key: &str) -> Option<RecordId> {
    match R::IDENTITY {
        IdentityKind::PrimaryKey => record.attribute(primary_key),
        IdentityKind::DocumentId => record.document_id(),
    }
}

/// A record backed by a JSON object.
///
/// Useful for finders that return raw documents rather than typed models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    /// The record attributes.
    pub attributes: Map<String, Value>,
    /// The backend score, once merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solr_score: Option<f64>,
}

impl JsonRecord {
    /// Wraps a JSON object. Non-objects yield an empty record.
    pub fn new(value: Value) -> Self {
        let attributes = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            attributes,
            solr_score: None,
        }
    }

    /// Returns an attribute value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

impl From<Value> for JsonRecord {
    fn from(value: Value) -> Self {
        JsonRecord::new(value)
    }
}

impl Identifiable for JsonRecord {
    fn attribute(&self, name: &str) -> Option<RecordId> {
        self.attributes.get(name).and_then(RecordId::from_value)
    }
}

impl Scorable for JsonRecord {
    fn set_solr_score(&mut self, score: f64) {
        self.solr_score = Some(score);
    }

    fn solr_score(&self) -> Option<f64> {
        self.solr_score
    }
}

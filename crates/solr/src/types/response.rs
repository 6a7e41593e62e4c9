//! The raw backend response consumed by the result parser.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ResultsError;

use super::record_id::RecordId;

/// One hit in a backend response.
///
/// Carries at least the primary-key field and usually `score`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolrHit(pub Map<String, Value>);

impl SolrHit {
    /// Creates a hit from a JSON object. Non-objects yield an empty hit.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => SolrHit(map),
            _ => SolrHit::default(),
        }
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the identifiers stored in a field, flattening multi-valued fields.
    pub fn ids(&self, field: &str) -> Vec<RecordId> {
        self.get(field).map(RecordId::all_from_value).unwrap_or_default()
    }

    /// Returns the relevance score.
    pub fn score(&self) -> Option<f64> {
        self.get("score").and_then(Value::as_f64)
    }
}

/// The `responseHeader` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Backend status code.
    #[serde(default)]
    pub status: Option<i64>,

    /// Query time as reported by the backend.
    #[serde(rename = "QTime", default)]
    pub qtime: Option<Value>,

    /// Echoed request parameters.
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
}

impl ResponseHeader {
    /// Returns the query time, accepting numbers and numeric strings.
    pub fn query_time(&self) -> Option<f64> {
        self.qtime.as_ref().and_then(number_like)
    }

    /// Returns an echoed numeric parameter such as `rows` or `start`.
    pub fn param_u64(&self, name: &str) -> Option<u64> {
        self.params
            .as_ref()
            .and_then(|params| params.get(name))
            .and_then(number_like)
            .map(|n| n as u64)
    }
}

/// The `response` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Total number of matches.
    #[serde(rename = "numFound", default)]
    pub num_found: u64,

    /// Offset of the first returned hit.
    #[serde(default)]
    pub start: u64,

    /// Highest score among the matches.
    #[serde(rename = "maxScore", default)]
    pub max_score: Option<f64>,

    /// Returned hits in backend order.
    #[serde(default)]
    pub docs: Vec<SolrHit>,
}

/// A decoded select response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolrResponse {
    /// Response header.
    #[serde(rename = "responseHeader", default)]
    pub header: Option<ResponseHeader>,

    /// Hits and counts.
    #[serde(default)]
    pub response: ResponseBody,

    /// Facet counts, when faceting was requested.
    #[serde(default)]
    pub facet_counts: Option<Value>,

    /// Highlighting keyed by unique document key.
    #[serde(default)]
    pub highlighting: Option<Map<String, Value>>,

    /// Spellcheck suggestions.
    #[serde(default)]
    pub spellcheck: Option<Value>,
}

impl SolrResponse {
    /// Creates a response with the given total and hits.
    pub fn new(total_hits: u64, hits: Vec<SolrHit>) -> Self {
        Self {
            response: ResponseBody {
                num_found: total_hits,
                docs: hits,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Decodes a JSON select response.
    pub fn from_json(value: Value) -> Result<Self, ResultsError> {
        serde_json::from_value(value).map_err(|e| ResultsError::MalformedResponse {
            message: e.to_string(),
        })
    }

    /// Sets the maximum score.
    pub fn with_max_score(mut self, max_score: f64) -> Self {
        self.response.max_score = Some(max_score);
        self
    }

    /// Sets the response header.
    pub fn with_header(mut self, header: ResponseHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the facet counts.
    pub fn with_facets(mut self, facets: Value) -> Self {
        self.facet_counts = Some(facets);
        self
    }

    /// Sets the highlighting section.
    pub fn with_highlighting(mut self, highlighting: Map<String, Value>) -> Self {
        self.highlighting = Some(highlighting);
        self
    }

    /// Total number of matches.
    pub fn total_hits(&self) -> u64 {
        self.response.num_found
    }

    /// Returned hits in backend order.
    pub fn hits(&self) -> &[SolrHit] {
        &self.response.docs
    }

    /// Highest score among the matches.
    pub fn max_score(&self) -> Option<f64> {
        self.response.max_score
    }

    /// Query time from the header.
    pub fn query_time(&self) -> Option<f64> {
        self.header.as_ref().and_then(ResponseHeader::query_time)
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

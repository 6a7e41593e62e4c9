//! The structured request handed to the search backend.

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A select request in backend parameter form.
///
/// Built by the query builder and passed whole to the executor. Parameter
/// names follow the backend's select handler (`q`, `fl`, `rows`, `hl.fl`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolrRequest {
    /// The query string.
    #[serde(rename = "q")]
    pub query: String,

    /// Returned fields, always the primary key and `score`.
    #[serde(rename = "fl", serialize_with = "comma_joined")]
    pub field_list: Vec<String>,

    /// Number of rows to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,

    /// Offset of the first row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,

    /// Sort clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Default boolean operator.
    #[serde(rename = "q.op", skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Filter queries.
    #[serde(rename = "fq", skip_serializing_if = "Vec::is_empty")]
    pub filter_queries: Vec<String>,

    /// Request handler override (`geo` for radius searches).
    #[serde(rename = "qt", skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,

    /// Latitude of the geo search center.
    #[serde(rename = "lat", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,

    /// Longitude of the geo search center.
    #[serde(rename = "long", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,

    /// Radius of the geo search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<Number>,

    /// Highlighting parameters.
    #[serde(flatten)]
    pub highlight: Option<HighlightParams>,

    /// Faceting parameters.
    #[serde(flatten)]
    pub facets: Option<FacetParams>,

    /// Spellcheck suggestions.
    pub spellcheck: bool,

    /// Collate spellcheck suggestions into a corrected query.
    #[serde(rename = "spellcheck.collate")]
    pub spellcheck_collate: bool,

    /// Response writer.
    #[serde(rename = "wt")]
    pub writer: String,
}

/// Highlighting parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HighlightParams {
    /// Highlighting enabled.
    pub hl: bool,

    /// Fields to highlight.
    #[serde(rename = "hl.fl", serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Only highlight fields that matched.
    #[serde(rename = "hl.requireFieldMatch", skip_serializing_if = "Option::is_none")]
    pub require_field_match: Option<bool>,

    /// Snippets per field.
    #[serde(rename = "hl.snippets", skip_serializing_if = "Option::is_none")]
    pub snippets: Option<u32>,

    /// Text before highlighted terms.
    #[serde(rename = "hl.simple.pre", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Text after highlighted terms.
    #[serde(rename = "hl.simple.post", skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Faceting parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetParams {
    /// Faceting enabled.
    pub facet: bool,

    /// Facet fields.
    #[serde(rename = "facet.field", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Facet queries.
    #[serde(rename = "facet.query", skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<String>,

    /// Values per field.
    #[serde(rename = "facet.limit")]
    pub limit: i64,

    /// Minimum count.
    #[serde(rename = "facet.mincount")]
    pub mincount: u64,

    /// Sort order (`count`).
    #[serde(rename = "facet.sort", skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Offset into the value list.
    #[serde(rename = "facet.offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Value prefix.
    #[serde(rename = "facet.prefix", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Count missing values.
    #[serde(rename = "facet.missing", skip_serializing_if = "Option::is_none")]
    pub missing: Option<bool>,

    /// Date facet fields.
    #[serde(rename = "facet.date", skip_serializing_if = "Vec::is_empty")]
    pub date_fields: Vec<String>,

    /// Date facet lower bound.
    #[serde(rename = "facet.date.start", skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,

    /// Date facet upper bound.
    #[serde(rename = "facet.date.end", skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,

    /// Date facet bucket size.
    #[serde(rename = "facet.date.gap", skip_serializing_if = "Option::is_none")]
    pub date_gap: Option<String>,

    /// Truncate the last bucket.
    #[serde(rename = "facet.date.hardend", skip_serializing_if = "Option::is_none")]
    pub date_hardend: Option<bool>,

    /// Extra counts outside the buckets.
    #[serde(rename = "facet.date.other", skip_serializing_if = "Option::is_none")]
    pub date_other: Option<String>,
}

impl SolrRequest {
    /// Creates a request for the given query and returned fields.
    ///
    /// Spellcheck and collation are always on.
    pub fn new(query: impl Into<String>, field_list: Vec<String>) -> Self {
        Self {
            query: query.into(),
            field_list,
            spellcheck: true,
            spellcheck_collate: true,
            writer: "json".to_string(),
            ..Default::default()
        }
    }

    /// Returns the request as a parameter map.
    pub fn to_params(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Returns the request as `(name, value)` pairs for a query string.
    ///
    /// Multi-valued parameters are repeated, one pair per value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in self.to_params() {
            match value {
                Value::Array(values) => {
                    for value in values {
                        pairs.push((name.clone(), scalar_to_string(&value)));
                    }
                }
                other => pairs.push((name, scalar_to_string(&other))),
            }
        }
        pairs
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[allow(clippy::ptr_arg)]
fn comma_joined<S>(values: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&values.join(","))
}

//! Search options accepted by the query builder and the result parser.
//!
//! Options can be built programmatically or read from a loose JSON map with
//! [`SearchOptions::try_from`], which rejects keys outside the recognized set
//! before anything reaches the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::QueryError;

/// Option keys accepted at the top level of a search call.
pub const RECOGNIZED_OPTIONS: &[&str] = &[
    "limit",
    "offset",
    "relevance",
    "highlight",
    "operator",
    "around",
    "order",
    "facets",
    "scores",
    "include",
    "lazy",
    "format",
    "core",
];

/// How parsed hits are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Resolve hits into full records (default).
    #[default]
    Objects,
    /// Return the bare primary-key values.
    Ids,
}

/// Boolean operator applied between query terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryOperator {
    /// All terms must match.
    And,
    /// Any term may match.
    Or,
}

impl QueryOperator {
    /// Returns the backend parameter value (`AND` / `OR`).
    pub fn as_param(&self) -> &'static str {
        match self {
            QueryOperator::And => "AND",
            QueryOperator::Or => "OR",
        }
    }
}

/// Geo-radius search around a point.
///
/// Latitude and longitude are passed to the backend exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AroundOptions {
    /// Latitude of the center point.
    pub latitude: Value,
    /// Longitude of the center point.
    pub longitude: Value,
    /// Search radius.
    pub radius: Number,
}

impl AroundOptions {
    /// Creates geo options from coordinates and a radius.
    pub fn new(latitude: impl Into<Value>, longitude: impl Into<Value>, radius: impl Into<Number>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            radius: radius.into(),
        }
    }
}

/// Highlighting options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightOptions {
    /// Fields to highlight.
    #[serde(default, deserialize_with = "one_or_many")]
    pub fields: Vec<String>,
    /// Only highlight fields that matched the query.
    #[serde(default)]
    pub require_field_match: Option<bool>,
    /// Maximum number of snippets per field.
    #[serde(default)]
    pub max_snippets: Option<u32>,
    /// Text inserted before each highlighted term.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Text inserted after each highlighted term.
    #[serde(default)]
    pub suffix: Option<String>,
}

impl HighlightOptions {
    /// Highlights the given fields.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Date facet options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateFacetOptions {
    /// Date fields to facet on.
    #[serde(default, deserialize_with = "one_or_many")]
    pub fields: Vec<String>,
    /// Lower bound (date math allowed, e.g. `NOW-1YEAR`).
    #[serde(default)]
    pub start: Option<String>,
    /// Upper bound.
    #[serde(default)]
    pub end: Option<String>,
    /// Bucket size (e.g. `+1MONTH`).
    #[serde(default)]
    pub gap: Option<String>,
    /// Truncate the last bucket at `end`.
    #[serde(default)]
    pub hardend: Option<bool>,
    /// Extra counts outside the buckets (`before`, `after`, `between`, `none`, `all`).
    #[serde(default)]
    pub other: Option<String>,
    /// Filter queries on date fields (`field:[range]`).
    #[serde(default, deserialize_with = "one_or_many")]
    pub filter: Vec<String>,
}

/// Faceting options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacetOptions {
    /// Facet fields.
    #[serde(default, deserialize_with = "one_or_many")]
    pub fields: Vec<String>,
    /// Facet queries (`field:value`).
    #[serde(default, deserialize_with = "one_or_many")]
    pub query: Vec<String>,
    /// Drill-down filters on facet values (`field:value`).
    #[serde(default, deserialize_with = "one_or_many")]
    pub browse: Vec<String>,
    /// Sort facet values by count instead of index order.
    #[serde(default)]
    pub sort: bool,
    /// Include zero counts (`false` sets the minimum count to 1).
    #[serde(default)]
    pub zeros: Option<bool>,
    /// Minimum count for a facet value to be returned.
    #[serde(default)]
    pub mincount: Option<u64>,
    /// Maximum number of values per facet field (`-1` for no limit).
    #[serde(default)]
    pub limit: Option<i64>,
    /// Offset into the facet value list.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Only return facet values with this prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Also count documents with no value.
    #[serde(default)]
    pub missing: Option<bool>,
    /// Date facets.
    #[serde(default)]
    pub dates: Option<DateFacetOptions>,
}

/// Options for a search call.
///
/// The same options drive request building (pagination, boosts, facets, ...)
/// and result parsing (`format`, `lazy`, `scores`, `include`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchOptions {
    /// Maximum number of rows.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Offset of the first row.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Boost weights per field.
    #[serde(default)]
    pub relevance: BTreeMap<String, Number>,
    /// Highlighting options.
    #[serde(default)]
    pub highlight: Option<HighlightOptions>,
    /// Boolean operator between terms.
    #[serde(default)]
    pub operator: Option<QueryOperator>,
    /// Geo-radius search.
    #[serde(default)]
    pub around: Option<AroundOptions>,
    /// Sort clause (`"field direction[, field direction]"`).
    #[serde(default)]
    pub order: Option<String>,
    /// Faceting options.
    #[serde(default)]
    pub facets: Option<FacetOptions>,
    /// Merge backend scores onto resolved records.
    #[serde(default)]
    pub scores: bool,
    /// Associations to load alongside records.
    #[serde(default, deserialize_with = "one_or_many")]
    pub include: Vec<String>,
    /// Return deferred documents instead of loading records.
    #[serde(default)]
    pub lazy: bool,
    /// Result format. An explicit `null` selects ids.
    #[serde(default, deserialize_with = "format_or_ids")]
    pub format: ResultFormat,
    /// Backend core to query.
    #[serde(default)]
    pub core: Option<String>,
}

impl SearchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the row offset.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Adds a relevance boost for a field.
    pub fn with_relevance(mut self, field: impl Into<String>, weight: impl Into<Number>) -> Self {
        self.relevance.insert(field.into(), weight.into());
        self
    }

    /// Sets the highlighting options.
    pub fn with_highlight(mut self, highlight: HighlightOptions) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Sets the boolean operator.
    pub fn with_operator(mut self, operator: QueryOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Sets the geo-radius search.
    pub fn with_around(mut self, around: AroundOptions) -> Self {
        self.around = Some(around);
        self
    }

    /// Sets the sort clause.
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Sets the facet options.
    pub fn with_facets(mut self, facets: FacetOptions) -> Self {
        self.facets = Some(facets);
        self
    }

    /// Requests backend scores on resolved records.
    pub fn with_scores(mut self) -> Self {
        self.scores = true;
        self
    }

    /// Adds an association to load with each record.
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include.push(include.into());
        self
    }

    /// Requests deferred documents.
    pub fn with_lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Sets the result format.
    pub fn with_format(mut self, format: ResultFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the backend core.
    pub fn with_core(mut self, core: impl Into<String>) -> Self {
        self.core = Some(core.into());
        self
    }

    /// Returns true if facets were requested.
    pub fn wants_facets(&self) -> bool {
        self.facets.is_some()
    }
}

impl TryFrom<Value> for SearchOptions {
    type Error = QueryError;

    /// Validates keys against [`RECOGNIZED_OPTIONS`] and decodes the values.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let map = match value {
            Value::Null => return Ok(SearchOptions::default()),
            Value::Object(map) => map,
            other => {
                return Err(QueryError::InvalidOptionValue {
                    option: "options".to_string(),
                    message: format!("expected an object, got {}", other),
                });
            }
        };

        if let Some(unknown) = map
            .keys()
            .find(|key| !RECOGNIZED_OPTIONS.contains(&key.as_str()))
        {
            return Err(QueryError::InvalidOption {
                option: unknown.clone(),
            });
        }

        let mut options = SearchOptions::default();
        for (key, value) in map {
            let mut single = serde_json::Map::new();
            single.insert(key.clone(), value);
            let partial: SearchOptions = serde_json::from_value(Value::Object(single))
                .map_err(|e| QueryError::InvalidOptionValue {
                    option: key.clone(),
                    message: e.to_string(),
                })?;
            options.merge_key(&key, partial);
        }
        Ok(options)
    }
}

impl SearchOptions {
    fn merge_key(&mut self, key: &str, partial: SearchOptions) {
        match key {
            "limit" => self.limit = partial.limit,
            "offset" => self.offset = partial.offset,
            "relevance" => self.relevance = partial.relevance,
            "highlight" => self.highlight = partial.highlight,
            "operator" => self.operator = partial.operator,
            "around" => self.around = partial.around,
            "order" => self.order = partial.order,
            "facets" => self.facets = partial.facets,
            "scores" => self.scores = partial.scores,
            "include" => self.include = partial.include,
            "lazy" => self.lazy = partial.lazy,
            "format" => self.format = partial.format,
            "core" => self.core = partial.core,
            _ => {}
        }
    }
}

/// Accepts a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Maps an explicit `null` format to [`ResultFormat::Ids`].
fn format_or_ids<'de, D>(deserializer: D) -> Result<ResultFormat, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ResultFormat>::deserialize(deserializer)?.unwrap_or(ResultFormat::Ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = SearchOptions::try_from(json!({"invalid": true})).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOption { ref option } if option == "invalid"));
    }

    #[test]
    fn test_direct_deserialize_rejects_unknown_key() {
        let result = serde_json::from_value::<SearchOptions>(json!({"invalid": true, "limit": 3}));
        assert!(result.is_err());

        let options: SearchOptions = serde_json::from_value(json!({"limit": 3})).unwrap();
        assert_eq!(options.limit, Some(3));
    }

    #[test]
    fn test_recognized_options_decode() {
        let options = SearchOptions::try_from(json!({
            "limit": 10,
            "offset": 20,
            "relevance": {"tag": 5, "description": 3},
            "operator": "or",
            "order": "active desc",
            "highlight": {"fields": "title"},
            "around": {"latitude": "-39.36", "longitude": "77.4027", "radius": 12},
            "scores": true,
            "include": ["author"],
            "lazy": true,
        }))
        .unwrap();

        assert_eq!(options.limit, Some(10));
        assert_eq!(options.offset, Some(20));
        assert_eq!(options.relevance.len(), 2);
        assert_eq!(options.operator, Some(QueryOperator::Or));
        assert_eq!(options.highlight.unwrap().fields, vec!["title".to_string()]);
        assert_eq!(options.around.unwrap().latitude, json!("-39.36"));
        assert!(options.scores);
        assert!(options.lazy);
        assert_eq!(options.include, vec!["author".to_string()]);
        assert_eq!(options.format, ResultFormat::Objects);
    }

    #[test]
    fn test_null_format_selects_ids() {
        let options = SearchOptions::try_from(json!({"format": null})).unwrap();
        assert_eq!(options.format, ResultFormat::Ids);

        let options = SearchOptions::try_from(json!({"format": "ids", "lazy": true})).unwrap();
        assert_eq!(options.format, ResultFormat::Ids);

        let options = SearchOptions::try_from(json!({})).unwrap();
        assert_eq!(options.format, ResultFormat::Objects);
    }

    #[test]
    fn test_bad_value_names_the_option() {
        let err = SearchOptions::try_from(json!({"limit": "ten"})).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOptionValue { ref option, .. } if option == "limit"));

        let err = SearchOptions::try_from(json!({"highlight": {"colour": "red"}})).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOptionValue { ref option, .. } if option == "highlight"));
    }

    #[test]
    fn test_builder_methods() {
        let options = SearchOptions::new()
            .with_limit(5)
            .with_relevance("tag", 5)
            .with_operator(QueryOperator::And)
            .with_format(ResultFormat::Ids);
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.relevance["tag"].to_string(), "5");
        assert_eq!(QueryOperator::And.as_param(), "AND");
        assert_eq!(options.format, ResultFormat::Ids);
    }
}

//! The per-model index schema used to shape queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SolrConfig;

use super::field_type::FieldType;

/// How one model attribute is indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// The declared type, which selects the index suffix.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Index name when it differs from the attribute name.
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl FieldDefinition {
    /// Creates a definition with the given type.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            alias: None,
        }
    }

    /// Indexes the attribute under another name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// The searchable shape of one model.
///
/// Carries the class name used for the implicit type filter, the primary-key
/// field, and the attributes whose index type differs from plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSchema {
    /// The model class name stored in the type field.
    pub class_name: String,

    /// Subclasses whose documents also match searches on this model.
    #[serde(default)]
    pub subclass_names: Vec<String>,

    /// Index field holding the primary key.
    #[serde(default = "default_primary_key_field")]
    pub primary_key_field: String,

    /// Index field holding the class name.
    #[serde(default = "default_type_field")]
    pub type_field: String,

    /// Request handler for radius searches.
    #[serde(default = "default_geo_query_type")]
    pub geo_query_type: String,

    /// Typed attributes. Attributes not listed are indexed as text.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
}

fn default_primary_key_field() -> String {
    SolrConfig::default().primary_key_field
}

fn default_type_field() -> String {
    SolrConfig::default().type_field
}

fn default_geo_query_type() -> String {
    SolrConfig::default().geo_query_type
}

impl IndexSchema {
    /// Creates a schema for a model with default configuration.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self::from_config(class_name, &SolrConfig::default())
    }

    /// Creates a schema for a model using the given configuration.
    pub fn from_config(class_name: impl Into<String>, config: &SolrConfig) -> Self {
        Self {
            class_name: class_name.into(),
            subclass_names: Vec::new(),
            primary_key_field: config.primary_key_field.clone(),
            type_field: config.type_field.clone(),
            geo_query_type: config.geo_query_type.clone(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets the primary-key field.
    pub fn with_primary_key_field(mut self, field: impl Into<String>) -> Self {
        self.primary_key_field = field.into();
        self
    }

    /// Adds a typed field.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), FieldDefinition::new(field_type));
        self
    }

    /// Adds a typed field with a full definition.
    pub fn with_field_definition(
        mut self,
        name: impl Into<String>,
        definition: FieldDefinition,
    ) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }

    /// Adds a subclass whose documents also match.
    pub fn with_subclass(mut self, class_name: impl Into<String>) -> Self {
        self.subclass_names.push(class_name.into());
        self
    }

    /// Returns the implicit type filter, e.g. `(type:Post)` or
    /// `(type:Post OR type:Article)`.
    pub fn type_condition(&self) -> String {
        let clauses: Vec<String> = std::iter::once(&self.class_name)
            .chain(self.subclass_names.iter())
            .filter(|name| !name.is_empty())
            .map(|name| format!("{}:{}", self.type_field, escape_class_name(name)))
            .collect();
        format!("({})", clauses.join(" OR "))
    }

    /// Returns the `(index name, type)` pairs used for suffix rewriting.
    pub fn indexed_fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(name, definition)| {
            let indexed = definition.alias.as_deref().unwrap_or(name.as_str());
            (indexed, &definition.field_type)
        })
    }
}

/// Quotes class names that contain query syntax, such as namespaced names.
fn escape_class_name(name: &str) -> String {
    if name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_condition() {
        let schema = IndexSchema::new("Post");
        assert_eq!(schema.type_condition(), "(type:Post)");

        let schema = schema.with_subclass("Article");
        assert_eq!(schema.type_condition(), "(type:Post OR type:Article)");

        let schema = IndexSchema::new("Blog::Post");
        assert_eq!(schema.type_condition(), "(type:\"Blog::Post\")");
    }

    #[test]
    fn test_indexed_fields_use_alias() {
        let schema = IndexSchema::new("Post")
            .with_field("age", FieldType::Integer)
            .with_field_definition(
                "name",
                FieldDefinition::new(FieldType::String).with_alias("full_name"),
            );
        let fields: Vec<(&str, &str)> = schema
            .indexed_fields()
            .map(|(name, field_type)| (name, field_type.code()))
            .collect();
        assert_eq!(fields, vec![("age", "i"), ("full_name", "s")]);
    }

    #[test]
    fn test_deserialize_schema() {
        let schema: IndexSchema = serde_json::from_value(json!({
            "class_name": "Post",
            "primary_key_field": "pk_id",
            "fields": {
                "name": {"type": "string"},
                "rating": {"type": {"code": "custom"}, "as": "score_value"}
            }
        }))
        .unwrap();

        assert_eq!(schema.primary_key_field, "pk_id");
        assert_eq!(schema.type_field, "type");
        assert_eq!(schema.fields["name"].field_type, FieldType::String);
        assert_eq!(schema.fields["rating"].alias.as_deref(), Some("score_value"));
    }

    #[test]
    fn test_from_config() {
        let config = SolrConfig {
            primary_key_field: "pk_id".to_string(),
            type_field: "type_s".to_string(),
            ..Default::default()
        };
        let schema = IndexSchema::from_config("Post", &config);
        assert_eq!(schema.primary_key_field, "pk_id");
        assert_eq!(schema.type_condition(), "(type_s:Post)");
    }
}

//! Configuration for the Solr integration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SOLR_PRIMARY_KEY_FIELD` | id | Index field holding the record primary key |
//! | `SOLR_TYPE_FIELD` | type | Index field holding the record class name |
//! | `SOLR_DEFAULT_CORE` | (none) | Core queried when a search names none |
//! | `SOLR_GEO_QUERY_TYPE` | geo | Request handler used for radius searches |
//!
//! # Example
//!
//! ```rust
//! use helios_solr::SolrConfig;
//!
//! let config = SolrConfig {
//!     primary_key_field: "pk_id".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.type_field, "type");
//! ```

use serde::{Deserialize, Serialize};

/// Configuration shared by the query builder and the result parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolrConfig {
    /// Index field holding the record primary key (default: `"id"`).
    #[serde(default = "default_primary_key_field")]
    pub primary_key_field: String,

    /// Index field holding the record class name (default: `"type"`).
    #[serde(default = "default_type_field")]
    pub type_field: String,

    /// Core queried when a search names none.
    #[serde(default)]
    pub default_core: Option<String>,

    /// Request handler used for radius searches (default: `"geo"`).
    #[serde(default = "default_geo_query_type")]
    pub geo_query_type: String,
}

fn default_primary_key_field() -> String {
    "id".to_string()
}

fn default_type_field() -> String {
    "type".to_string()
}

fn default_geo_query_type() -> String {
    "geo".to_string()
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            primary_key_field: default_primary_key_field(),
            type_field: default_type_field(),
            default_core: None,
            geo_query_type: default_geo_query_type(),
        }
    }
}

impl SolrConfig {
    /// Creates a configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            primary_key_field: std::env::var("SOLR_PRIMARY_KEY_FIELD")
                .unwrap_or_else(|_| default_primary_key_field()),
            type_field: std::env::var("SOLR_TYPE_FIELD").unwrap_or_else(|_| default_type_field()),
            default_core: std::env::var("SOLR_DEFAULT_CORE")
                .ok()
                .filter(|core| !core.is_empty()),
            geo_query_type: std::env::var("SOLR_GEO_QUERY_TYPE")
                .unwrap_or_else(|_| default_geo_query_type()),
        }
    }
}

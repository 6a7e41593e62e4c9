//! Core types for the Solr integration.
//!
//! - [`FieldType`] - Declared field types and their index suffix codes
//! - [`IndexSchema`] - The searchable shape of one model
//! - [`SearchOptions`] - Options accepted by a search call
//! - [`SolrRequest`], [`SolrResponse`] - The backend request and response
//! - [`SearchResults`] - Parsed results
//!
//! # Examples
//!
//! ## Declaring a Schema
//!
//! ```
//! use helios_solr::types::{FieldType, IndexSchema};
//!
//! let schema = IndexSchema::new("Post")
//!     .with_field("age", FieldType::Integer)
//!     .with_field("name", FieldType::String);
//!
//! assert_eq!(schema.type_condition(), "(type:Post)");
//! ```
//!
//! ## Reading Options From JSON
//!
//! ```
//! use helios_solr::types::SearchOptions;
//! use serde_json::json;
//!
//! let options = SearchOptions::try_from(json!({"limit": 10, "order": "name asc"})).unwrap();
//! assert_eq!(options.limit, Some(10));
//!
//! assert!(SearchOptions::try_from(json!({"invalid": true})).is_err());
//! ```

mod field_type;
mod options;
mod record_id;
mod request;
mod response;
mod results;
mod schema;

pub use field_type::{FieldType, default_value_for};
pub use options::{
    AroundOptions, DateFacetOptions, FacetOptions, HighlightOptions, QueryOperator,
    RECOGNIZED_OPTIONS, ResultFormat, SearchOptions,
};
pub use record_id::RecordId;
pub use request::{FacetParams, HighlightParams, SolrRequest};
pub use response::{ResponseBody, ResponseHeader, SolrHit, SolrResponse};
pub use results::{FieldHighlights, ResultDocs, SearchResults};
pub use schema::{FieldDefinition, IndexSchema};

//! Helios Solr Search Integration
//!
//! This crate translates option-driven searches into Solr select requests and
//! turns the raw responses back into typed, ordered results.
//!
//! # Features
//!
//! - **Query Shaping**: Field type suffixes, relevance boosts, type filters,
//!   sorting, highlighting, geo-radius and faceting
//! - **Result Parsing**: Ids, deferred documents, or records loaded in hit order
//! - **Score Merging**: Relevance scores copied onto resolved records
//! - **Pluggable Collaborators**: Transport and record lookup behind async traits
//!
//! # Architecture
//!
//! ```text
//! query + SearchOptions
//!         │
//!         ▼
//! SolrQueryBuilder ──SolrRequest──▶ SolrExecutor
//!                                       │
//!                                  SolrResponse
//!                                       ▼
//!                                 ResultParser ──ids──▶ RecordFinder
//!                                       │
//!                                       ▼
//!                              SearchResults<R>
//! ```
//!
//! # Quick Start
//!
//! ```
//! use helios_solr::{SearchOptions, SolrQueryBuilder};
//! use helios_solr::types::{FieldType, IndexSchema};
//!
//! let schema = IndexSchema::new("Post").with_field("name", FieldType::String);
//! let options = SearchOptions::new().with_limit(10).with_order("name asc");
//!
//! let request = SolrQueryBuilder::new(&schema)
//!     .build(Some("name:Chunky"), &options)
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(request.query, "(name_s:Chunky) (type:Post)");
//! assert_eq!(request.sort.as_deref(), Some("name_s asc"));
//! assert_eq!(request.rows, Some(10));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod core;
pub mod error;
pub mod search;
pub mod types;

// Re-export commonly used types at crate root
pub use config::SolrConfig;
pub use error::{SolrError, SolrResult};
pub use types::{
    FieldType, IndexSchema, RecordId, ResultDocs, SearchOptions, SearchResults, SolrRequest,
    SolrResponse,
};

// Re-export core traits
pub use crate::core::{FindOptions, Identifiable, JsonRecord, RecordFinder, Scorable, SolrExecutor};

// Re-export search entry points
pub use search::{LazyDocument, ResultParser, SolrQueryBuilder, SolrSearcher};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Solr query shaping and result parsing.
//!
//! - [`SolrQueryBuilder`] - Builds select requests from a query and options
//! - [`ResultParser`] - Turns responses into ordered, typed results
//! - [`LazyDocument`] - A hit whose record is loaded on first access
//! - [`SolrSearcher`] - Runs both sides against an executor and a finder

mod facets;
mod lazy;
mod parser;
mod query_builder;
mod searcher;
mod type_suffix;

pub use facets::{FacetRequest, build_facets};
pub use lazy::LazyDocument;
pub use parser::{ResultParser, add_scores, reorder};
pub use query_builder::SolrQueryBuilder;
pub use searcher::SolrSearcher;
pub use type_suffix::{TEXT_SUFFIX, add_text_suffix, order_clause, replace_types, strip_suffix};

//! Collaborator traits consumed by the search layer.
//!
//! The search layer shapes requests and parses responses; everything that
//! touches the network or the record store sits behind these traits:
//!
//! - [`SolrExecutor`] - Sends a request to the search backend
//! - [`RecordFinder`] - Bulk-loads records by primary key
//! - [`Identifiable`] - Reads the identifying value of a record
//! - [`Scorable`] - Receives the backend score of a record
//!
//! # Example: Wiring a Transport
//!
//! ```ignore
//! use async_trait::async_trait;
//! use helios_solr::core::SolrExecutor;
//! use helios_solr::error::BackendError;
//! use helios_solr::types::{SolrRequest, SolrResponse};
//! use helios_solr::SolrResult;
//!
//! struct HttpExecutor {
//!     client: reqwest::Client,
//!     base_url: String,
//! }
//!
//! #[async_trait]
//! impl SolrExecutor for HttpExecutor {
//!     async fn execute(&self, request: &SolrRequest, core: Option<&str>) -> SolrResult<SolrResponse> {
//!         let url = format!("{}/{}/select", self.base_url, core.unwrap_or("collection1"));
//!         let failed = |e: reqwest::Error| BackendError::RequestFailed {
//!             backend_name: "solr".to_string(),
//!             message: e.to_string(),
//!         };
//!         let body = self
//!             .client
//!             .get(url)
//!             .query(&request.to_query_pairs())
//!             .send()
//!             .await
//!             .map_err(failed)?
//!             .json()
//!             .await
//!             .map_err(failed)?;
//!         Ok(SolrResponse::from_json(body)?)
//!     }
//! }
//! ```

mod executor;
mod finder;
mod record;

pub use executor::SolrExecutor;
pub use finder::{FindOptions, RecordFinder};
pub use record::{IdentityKind, Identifiable, JsonRecord, Scorable, record_id};

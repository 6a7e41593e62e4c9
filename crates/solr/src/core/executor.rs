//! The request executor trait.

use async_trait::async_trait;

use crate::error::SolrResult;
use crate::types::{SolrRequest, SolrResponse};

/// Sends select requests to the search backend.
///
/// Implementations own the transport (HTTP client, connection pool,
/// timeouts). Transport failures are reported as
/// [`BackendError`](crate::error::BackendError) and are passed to the caller
/// unchanged.
#[async_trait]
pub trait SolrExecutor: Send + Sync {
    /// Executes a request against a core.
    ///
    /// # Arguments
    ///
    /// * `request` - The fully built request
    /// * `core` - The core to query (`None` for the backend default)
    async fn execute(&self, request: &SolrRequest, core: Option<&str>)
    -> SolrResult<SolrResponse>;
}

//! Deferred documents resolved on first access.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::core::{FindOptions, RecordFinder, Scorable};
use crate::error::{ResultsError, SolrError, SolrResult};
use crate::types::RecordId;

/// A search hit whose record is loaded on first access.
///
/// Holds the hit's identifier and a handle to the finder. The first call to
/// [`LazyDocument::resolve`] loads the record; later calls return the cached
/// one without touching the finder.
pub struct LazyDocument<R> {
    id: RecordId,
    score: Option<f64>,
    finder: Arc<dyn RecordFinder<Record = R>>,
    record: OnceCell<R>,
}

impl<R> LazyDocument<R>
where
    R: Scorable + Send + Sync,
{
    /// Creates a deferred document for the given identifier.
    pub fn new(id: RecordId, finder: Arc<dyn RecordFinder<Record = R>>) -> Self {
        Self {
            id,
            score: None,
            finder,
            record: OnceCell::new(),
        }
    }

    /// Attaches the hit score, stamped on the record when it resolves.
    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    /// Loads the record, or returns it if already loaded.
    ///
    /// Fails with [`ResultsError::RecordNotFound`] when the finder returns
    /// nothing for the identifier. Finder errors are returned unchanged and
    /// leave the document unresolved, so a later call retries.
    pub async fn resolve(&self) -> SolrResult<&R> {
        self.record
            .get_or_try_init(|| async {
                let records = self
                    .finder
                    .find_by_ids(std::slice::from_ref(&self.id), &FindOptions::default())
                    .await?;
                let mut record = records.into_iter().next().ok_or_else(|| {
                    ResultsError::RecordNotFound {
                        id: self.id.to_string(),
                    }
                })?;
                if let Some(score) = self.score {
                    record.set_solr_score(score);
                }
                tracing::debug!(id = %self.id, "Resolved lazy document");
                Ok::<R, SolrError>(record)
            })
            .await
    }
}

impl<R> LazyDocument<R> {
    /// The record identifier taken from the hit.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// The hit score, when scores were requested.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Returns true once the record has been loaded.
    pub fn is_resolved(&self) -> bool {
        self.record.initialized()
    }

    /// Returns the record if it has been loaded.
    pub fn get(&self) -> Option<&R> {
        self.record.get()
    }
}

impl<R> fmt::Debug for LazyDocument<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyDocument")
            .field("id", &self.id)
            .field("score", &self.score)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

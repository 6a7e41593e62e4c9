//! The record finder trait.

use async_trait::async_trait;

use crate::error::SolrResult;
use crate::types::RecordId;

/// Options passed along with a bulk lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Associations to load with each record.
    pub include: Vec<String>,
}

impl FindOptions {
    /// Creates options that load the given associations.
    pub fn with_include(include: Vec<String>) -> Self {
        Self { include }
    }
}

/// Loads domain records by primary key.
///
/// The result may come back in any order and may be shorter than `ids` when
/// records were deleted after indexing; the parser reorders and validates it.
#[async_trait]
pub trait RecordFinder: Send + Sync {
    /// The record type produced by this finder.
    type Record: Send + Sync;

    /// Loads all records whose primary key is in `ids`.
    async fn find_by_ids(
        &self,
        ids: &[RecordId],
        options: &FindOptions,
    ) -> SolrResult<Vec<Self::Record>>;
}

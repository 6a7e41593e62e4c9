//! Parsed search results.

use std::collections::HashMap;

use serde_json::Value;

use crate::search::LazyDocument;

use super::record_id::RecordId;

/// The documents of a result set, in backend hit order.
#[derive(Debug)]
pub enum ResultDocs<R> {
    /// Fully resolved records.
    Records(Vec<R>),
    /// Bare primary-key values.
    Ids(Vec<RecordId>),
    /// Deferred documents resolved on first access.
    Lazy(Vec<LazyDocument<R>>),
}

impl<R> Default for ResultDocs<R> {
    fn default() -> Self {
        ResultDocs::Records(Vec::new())
    }
}

impl<R> ResultDocs<R> {
    /// Number of documents.
    pub fn len(&self) -> usize {
        match self {
            ResultDocs::Records(records) => records.len(),
            ResultDocs::Ids(ids) => ids.len(),
            ResultDocs::Lazy(docs) => docs.len(),
        }
    }

    /// Returns true if there are no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the resolved records, if this is an objects result.
    pub fn records(&self) -> Option<&[R]> {
        match self {
            ResultDocs::Records(records) => Some(records),
            _ => None,
        }
    }

    /// Returns the primary-key values, if this is an ids result.
    pub fn ids(&self) -> Option<&[RecordId]> {
        match self {
            ResultDocs::Ids(ids) => Some(ids),
            _ => None,
        }
    }

    /// Returns the deferred documents, if this is a lazy result.
    pub fn lazy(&self) -> Option<&[LazyDocument<R>]> {
        match self {
            ResultDocs::Lazy(docs) => Some(docs),
            _ => None,
        }
    }

    /// Consumes the documents and returns the resolved records.
    pub fn into_records(self) -> Option<Vec<R>> {
        match self {
            ResultDocs::Records(records) => Some(records),
            _ => None,
        }
    }
}

/// Snippets per field for one record.
pub type FieldHighlights = HashMap<String, Value>;

/// The outcome of parsing a backend response.
#[derive(Debug)]
pub struct SearchResults<R> {
    /// Documents in hit order.
    pub docs: ResultDocs<R>,

    /// Total number of matches.
    pub total: u64,

    /// Highest score among the matches.
    pub max_score: Option<f64>,

    /// Facet counts, when facets were requested.
    pub facets: Option<Value>,

    /// Raw highlighting section.
    pub highlighting: Option<Value>,

    /// Highlights keyed by record id, with type suffixes stripped from field names.
    pub highlights: HashMap<String, FieldHighlights>,

    /// Query time reported by the backend.
    pub query_time: Option<f64>,

    /// Requested page size, echoed by the backend.
    pub rows: Option<u64>,

    /// Requested offset, echoed by the backend.
    pub start: Option<u64>,
}

impl<R> Default for SearchResults<R> {
    fn default() -> Self {
        Self {
            docs: ResultDocs::default(),
            total: 0,
            max_score: None,
            facets: None,
            highlighting: None,
            highlights: HashMap::new(),
            query_time: None,
            rows: None,
            start: None,
        }
    }
}

impl<R> SearchResults<R> {
    /// Creates an empty result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of documents on this page.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if this page holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns the highlights for a record.
    pub fn highlights_for(&self, id: &RecordId) -> Option<&FieldHighlights> {
        self.highlights.get(&id.to_string())
    }

    /// Page size. Falls back to the number of documents when not echoed.
    pub fn per_page(&self) -> u64 {
        match self.rows {
            Some(rows) if rows > 0 => rows,
            _ => self.docs.len() as u64,
        }
    }

    /// One-based page number.
    pub fn current_page(&self) -> u64 {
        let per_page = self.per_page();
        if per_page == 0 {
            return 1;
        }
        self.start.unwrap_or(0) / per_page + 1
    }

    /// Number of pages.
    pub fn total_pages(&self) -> u64 {
        let per_page = self.per_page();
        if per_page == 0 {
            return 1;
        }
        self.total.div_ceil(per_page).max(1)
    }

    /// The previous page number, if any.
    pub fn previous_page(&self) -> Option<u64> {
        let current = self.current_page();
        (current > 1).then(|| current - 1)
    }

    /// The next page number, if any.
    pub fn next_page(&self) -> Option<u64> {
        let current = self.current_page();
        (current < self.total_pages()).then(|| current + 1)
    }
}

//! Error types for the Solr integration layer.
//!
//! Errors are grouped by the stage that raises them: schema handling, query
//! building, result parsing, and the backend collaborators (executor and
//! record finder) whose failures are passed through untouched.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all search operations.
#[derive(Error, Debug)]
pub enum SolrError {
    /// Field type and schema errors
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Query building errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Result parsing errors
    #[error(transparent)]
    Results(#[from] ResultsError),

    /// Errors reported by the executor or the record finder
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to field type resolution.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The field type tag is unknown, or the input is not a tag or a literal code.
    #[error("invalid field type: {value}")]
    InvalidFieldType { value: String },
}

/// Errors raised while turning search options into a request.
#[derive(Error, Debug)]
pub enum QueryError {
    /// An option key outside the recognized set was supplied.
    #[error("invalid option: {option}")]
    InvalidOption { option: String },

    /// A recognized option carried a value of the wrong shape.
    #[error("invalid value for option '{option}': {message}")]
    InvalidOptionValue { option: String, message: String },

    /// Facet options are inconsistent.
    #[error("invalid facet options: {message}")]
    InvalidFacet { message: String },
}

/// Errors raised while turning a backend response into results.
#[derive(Error, Debug)]
pub enum ResultsError {
    /// The resolved records and the backend hits differ in length.
    #[error("out of sync: found {ids} items in index, but {records} records were resolved")]
    LengthMismatch { records: usize, ids: usize },

    /// A backend hit has no matching resolved record.
    #[error("out of sync: no resolved record for id {id}")]
    OutOfSync { id: String },

    /// A deferred document could not be resolved.
    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    /// The backend response does not have the expected structure.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

/// Errors originating from the search backend or the record store.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// The backend rejected or failed the request.
    #[error("request to {backend_name} failed: {message}")]
    RequestFailed {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type for search operations.
pub type SolrResult<T> = Result<T, SolrError>;

impl SolrError {
    /// Returns true if this error was raised by a backend collaborator.
    pub fn is_backend(&self) -> bool {
        matches!(self, SolrError::Backend(_))
    }

    /// Returns true if this error was caused by invalid caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SolrError::Schema(SchemaError::InvalidFieldType { .. })
                | SolrError::Query(QueryError::InvalidOption { .. })
                | SolrError::Query(QueryError::InvalidOptionValue { .. })
                | SolrError::Query(QueryError::InvalidFacet { .. })
        )
    }
}

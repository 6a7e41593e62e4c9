//! Search entry points combining the builder, the executor and the parser.

use std::sync::Arc;

use crate::config::SolrConfig;
use crate::core::{Identifiable, RecordFinder, Scorable, SolrExecutor};
use crate::error::SolrResult;
use crate::types::{IndexSchema, ResultFormat, SearchOptions, SearchResults};

use super::parser::ResultParser;
use super::query_builder::SolrQueryBuilder;

/// Searches one model.
///
/// # Example
///
/// ```ignore
/// let searcher = SolrSearcher::new(schema, executor, finder);
/// let results = searcher
///     .find_by_solr("title:car", &SearchOptions::new().with_limit(10))
///     .await?;
/// ```
pub struct SolrSearcher<R> {
    schema: IndexSchema,
    default_core: Option<String>,
    executor: Arc<dyn SolrExecutor>,
    finder: Arc<dyn RecordFinder<Record = R>>,
}

impl<R> SolrSearcher<R>
where
    R: Identifiable + Scorable + Send + Sync,
{
    /// Creates a searcher for the given schema.
    pub fn new(
        schema: IndexSchema,
        executor: Arc<dyn SolrExecutor>,
        finder: Arc<dyn RecordFinder<Record = R>>,
    ) -> Self {
        Self {
            schema,
            default_core: None,
            executor,
            finder,
        }
    }

    /// Creates a searcher for a model using the given configuration.
    pub fn from_config(
        class_name: impl Into<String>,
        config: &SolrConfig,
        executor: Arc<dyn SolrExecutor>,
        finder: Arc<dyn RecordFinder<Record = R>>,
    ) -> Self {
        Self::new(IndexSchema::from_config(class_name, config), executor, finder)
            .with_default_core(config.default_core.clone())
    }

    /// Sets the core queried when the options name none.
    pub fn with_default_core(mut self, core: Option<String>) -> Self {
        self.default_core = core;
        self
    }

    /// The schema searches are shaped by.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Searches and returns results shaped by the options.
    ///
    /// An empty query returns empty results without contacting the backend.
    pub async fn find_by_solr(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> SolrResult<SearchResults<R>> {
        let response = self
            .query_builder()
            .execute(self.executor.as_ref(), Some(query), options)
            .await?;
        ResultParser::new(&self.schema, Arc::clone(&self.finder))
            .parse(response.as_ref(), options)
            .await
    }

    /// Searches and returns only the matching record ids.
    pub async fn find_id_by_solr(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> SolrResult<SearchResults<R>> {
        let options = options.clone().with_format(ResultFormat::Ids);
        self.find_by_solr(query, &options).await
    }

    /// Returns the number of matches, or 0 for an empty query.
    pub async fn count_by_solr(&self, query: &str, options: &SearchOptions) -> SolrResult<u64> {
        let response = self
            .query_builder()
            .execute(self.executor.as_ref(), Some(query), options)
            .await?;
        Ok(response.map_or(0, |response| response.total_hits()))
    }

    fn query_builder(&self) -> SolrQueryBuilder<'_> {
        SolrQueryBuilder::new(&self.schema).with_default_core(self.default_core.as_deref())
    }
}

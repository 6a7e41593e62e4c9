//! Solr select request builder.
//!
//! Translates a query string and [`SearchOptions`] into a [`SolrRequest`] and
//! hands it to a [`SolrExecutor`].

use std::sync::LazyLock;

use regex::Regex;

use crate::core::SolrExecutor;
use crate::error::SolrResult;
use crate::types::{
    AroundOptions, HighlightOptions, HighlightParams, IndexSchema, SearchOptions, SolrRequest,
    SolrResponse,
};

use super::facets::build_facets;
use super::type_suffix::{TEXT_SUFFIX, add_text_suffix, field_name, order_clause, replace_types};

/// A `field_t:value` fragment. The value is a quoted phrase, a range, a
/// group, or a bare term.
static FIELD_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\w+_t:(?:"[^"]*"?|\[[^\]]*\]?|\{[^}]*\}?|\([^)]*\)?|\S*)"#)
        .expect("field fragment pattern is valid")
});

/// Builds select requests for one model.
pub struct SolrQueryBuilder<'a> {
    schema: &'a IndexSchema,
    default_core: Option<&'a str>,
}

impl<'a> SolrQueryBuilder<'a> {
    /// Creates a new query builder.
    pub fn new(schema: &'a IndexSchema) -> Self {
        Self {
            schema,
            default_core: None,
        }
    }

    /// Sets the core used when the options name none.
    pub fn with_default_core(mut self, core: Option<&'a str>) -> Self {
        self.default_core = core;
        self
    }

    /// Builds a request, or returns `None` when there is nothing to search for.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFacet`](crate::error::QueryError::InvalidFacet)
    /// for inconsistent date facet options.
    pub fn build(
        &self,
        text: Option<&str>,
        options: &SearchOptions,
    ) -> SolrResult<Option<SolrRequest>> {
        let text = match text.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(None),
        };

        let query = format!(
            "({}) {}",
            self.build_text_clause(text, options),
            self.schema.type_condition()
        );
        let mut request = SolrRequest::new(
            replace_types(&query, self.schema, true),
            vec![self.schema.primary_key_field.clone(), "score".to_string()],
        );

        request.rows = options.limit;
        request.start = options.offset;
        request.sort = options
            .order
            .as_deref()
            .map(|order| order_clause(order, self.schema));
        request.operator = options
            .operator
            .map(|operator| operator.as_param().to_string());

        if let Some(highlight) = &options.highlight {
            request.highlight = Some(self.build_highlight(highlight));
        }

        if let Some(around) = &options.around {
            self.apply_around(&mut request, around);
        }

        if let Some(facets) = &options.facets {
            let facets = build_facets(facets, self.schema)?;
            request.filter_queries.extend(facets.filter_queries);
            request.facets = Some(facets.params);
        }

        tracing::debug!(
            class_name = %self.schema.class_name,
            query = %request.query,
            rows = ?request.rows,
            start = ?request.start,
            "Built Solr request"
        );

        Ok(Some(request))
    }

    /// Builds the request and executes it.
    ///
    /// Returns `Ok(None)` without contacting the backend when the query text
    /// is absent or empty. Executor errors are returned unchanged.
    pub async fn execute(
        &self,
        executor: &dyn SolrExecutor,
        text: Option<&str>,
        options: &SearchOptions,
    ) -> SolrResult<Option<SolrResponse>> {
        let Some(request) = self.build(text, options)? else {
            tracing::debug!("Empty query, skipping Solr request");
            return Ok(None);
        };

        let core = options.core.as_deref().or(self.default_core);
        let response = executor.execute(&request, core).await?;
        Ok(Some(response))
    }

    /// Builds the text part of the query: the suffixed query text, OR-joined
    /// with one boost clause per relevance field.
    fn build_text_clause(&self, text: &str, options: &SearchOptions) -> String {
        let mut clause = add_text_suffix(text);
        if options.relevance.is_empty() {
            return clause;
        }

        let free_text = free_text(&clause);
        if free_text.is_empty() {
            return clause;
        }

        for (field, weight) in &options.relevance {
            clause.push_str(&format!(
                " OR {}{}:({})^{}",
                field, TEXT_SUFFIX, free_text, weight
            ));
        }
        clause
    }

    fn build_highlight(&self, highlight: &HighlightOptions) -> HighlightParams {
        HighlightParams {
            hl: true,
            fields: highlight
                .fields
                .iter()
                .map(|field| field_name(field, self.schema))
                .collect(),
            require_field_match: highlight.require_field_match,
            snippets: highlight.max_snippets,
            prefix: highlight.prefix.clone(),
            suffix: highlight.suffix.clone(),
        }
    }

    fn apply_around(&self, request: &mut SolrRequest, around: &AroundOptions) {
        request.query_type = Some(self.schema.geo_query_type.clone());
        request.latitude = Some(around.latitude.clone());
        request.longitude = Some(around.longitude.clone());
        request.radius = Some(around.radius.clone());
    }
}

/// Returns the terms of a suffixed query that are not qualified by a field.
fn free_text(suffixed: &str) -> String {
    FIELD_FRAGMENT
        .replace_all(suffixed, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

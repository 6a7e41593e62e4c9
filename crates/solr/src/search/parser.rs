//! Result parsing.
//!
//! Turns a [`SolrResponse`] into [`SearchResults`]: ids, deferred documents,
//! or records loaded through a [`RecordFinder`] in hit order.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::{FindOptions, Identifiable, RecordFinder, Scorable, record_id};
use crate::error::{ResultsError, SolrResult};
use crate::types::{
    FieldHighlights, IndexSchema, RecordId, ResultDocs, ResultFormat, SearchOptions, SearchResults,
    SolrHit, SolrResponse,
};

use super::lazy::LazyDocument;
use super::type_suffix::strip_suffix;

/// Parses backend responses for one model.
pub struct ResultParser<'a, R> {
    schema: &'a IndexSchema,
    finder: Arc<dyn RecordFinder<Record = R>>,
}

impl<'a, R> ResultParser<'a, R>
where
    R: Identifiable + Scorable + Send + Sync,
{
    /// Creates a new result parser.
    pub fn new(schema: &'a IndexSchema, finder: Arc<dyn RecordFinder<Record = R>>) -> Self {
        Self { schema, finder }
    }

    /// Parses a response into results.
    ///
    /// An absent response yields empty results. Otherwise the documents are
    /// shaped by the options: ids when the format is [`ResultFormat::Ids`],
    /// deferred documents when `lazy` is set, and records loaded in one bulk
    /// lookup by default.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::LengthMismatch`] or [`ResultsError::OutOfSync`]
    /// when the loaded records do not line up with the hits. Finder errors are
    /// returned unchanged.
    pub async fn parse(
        &self,
        response: Option<&SolrResponse>,
        options: &SearchOptions,
    ) -> SolrResult<SearchResults<R>> {
        let Some(response) = response else {
            return Ok(SearchResults::empty());
        };

        let primary_key = self.schema.primary_key_field.as_str();
        let ids: Vec<RecordId> = response
            .hits()
            .iter()
            .flat_map(|hit| hit.ids(primary_key))
            .collect();

        let docs = match options.format {
            ResultFormat::Ids => ResultDocs::Ids(ids),
            ResultFormat::Objects if options.lazy => {
                ResultDocs::Lazy(self.lazy_documents(response.hits(), options.scores))
            }
            ResultFormat::Objects => {
                let records = if ids.is_empty() {
                    Vec::new()
                } else {
                    let find_options = FindOptions::with_include(options.include.clone());
                    self.finder.find_by_ids(&ids, &find_options).await?
                };
                let mut records = reorder(records, &ids, primary_key)?;
                if options.scores {
                    add_scores(&mut records, response, self.schema);
                }
                ResultDocs::Records(records)
            }
        };

        let header = response.header.as_ref();
        let results = SearchResults {
            docs,
            total: response.total_hits(),
            max_score: response.max_score(),
            facets: if options.wants_facets() {
                response.facet_counts.clone()
            } else {
                None
            },
            highlighting: response.highlighting.clone().map(Value::Object),
            highlights: response
                .highlighting
                .as_ref()
                .map(process_highlights)
                .unwrap_or_default(),
            query_time: response.query_time(),
            rows: header.and_then(|h| h.param_u64("rows")),
            start: header.and_then(|h| h.param_u64("start")),
        };

        tracing::debug!(
            class_name = %self.schema.class_name,
            total = results.total,
            docs = results.len(),
            "Parsed Solr response"
        );

        Ok(results)
    }

    fn lazy_documents(&self, hits: &[SolrHit], scores: bool) -> Vec<LazyDocument<R>> {
        let primary_key = self.schema.primary_key_field.as_str();
        hits.iter()
            .flat_map(|hit| {
                let score = if scores { hit.score() } else { None };
                hit.ids(primary_key).into_iter().map(move |id| {
                    LazyDocument::new(id, Arc::clone(&self.finder)).with_score(score)
                })
            })
            .collect()
    }
}

/// Orders `records` to match `ids`.
///
/// Identifiers compare by their string form, so a hit id `"1"` matches a
/// record whose key is `1`.
///
/// # Errors
///
/// Returns [`ResultsError::LengthMismatch`] when the lengths differ and
/// [`ResultsError::OutOfSync`] when an id has no matching record.
pub fn reorder<R: Identifiable>(
    records: Vec<R>,
    ids: &[RecordId],
    primary_key: &str,
) -> Result<Vec<R>, ResultsError> {
    if records.len() != ids.len() {
        return Err(ResultsError::LengthMismatch {
            records: records.len(),
            ids: ids.len(),
        });
    }

    let mut remaining: Vec<Option<R>> = records.into_iter().map(Some).collect();
    ids.iter()
        .map(|id| {
            remaining
                .iter_mut()
                .find(|slot| {
                    matches!(slot, Some(record) if record_id(record, primary_key).as_ref() == Some(id))
                })
                .and_then(Option::take)
                .ok_or_else(|| ResultsError::OutOfSync { id: id.to_string() })
        })
        .collect()
}

/// Copies hit scores onto the matching records.
///
/// Hits are matched on the primary-key field. A hit without it is matched
/// through its unique key, written `<ClassName>:<record id>`. Hits without a
/// score or without a matching record are skipped.
pub fn add_scores<R>(records: &mut [R], response: &SolrResponse, schema: &IndexSchema)
where
    R: Identifiable + Scorable,
{
    let primary_key = schema.primary_key_field.as_str();
    for hit in response.hits() {
        let Some(score) = hit.score() else {
            continue;
        };
        let Some(id) = hit_record_id(hit, schema) else {
            tracing::warn!("Solr hit carries no record id, score dropped");
            continue;
        };
        if let Some(record) = records
            .iter_mut()
            .find(|record| record_id(&**record, primary_key).as_ref() == Some(&id))
        {
            record.set_solr_score(score);
        }
    }
}

/// Returns the record id of a hit, falling back to its `Class:id` unique key.
fn hit_record_id(hit: &SolrHit, schema: &IndexSchema) -> Option<RecordId> {
    if let Some(id) = hit.ids(&schema.primary_key_field).into_iter().next() {
        return Some(id);
    }

    let unique_key = match hit.get("id")? {
        Value::Array(values) => values.first()?.clone(),
        other => other.clone(),
    };
    let unique_key = RecordId::from_value(&unique_key)?.to_string();
    let (class_name, id) = unique_key.rsplit_once(':')?;
    let known_class = class_name == schema.class_name
        || schema.subclass_names.iter().any(|name| name == class_name);
    known_class.then(|| RecordId::from(id))
}

/// Re-keys the highlighting section by record id and strips the type suffix
/// from field names.
fn process_highlights(
    highlighting: &serde_json::Map<String, Value>,
) -> HashMap<String, FieldHighlights> {
    highlighting
        .iter()
        .filter_map(|(key, fields)| {
            let Value::Object(fields) = fields else {
                tracing::warn!(key = %key, "Unexpected highlighting entry, skipping");
                return None;
            };
            let id = key.rsplit_once(':').map_or(key.as_str(), |(_, id)| id);
            let fields = fields
                .iter()
                .map(|(field, snippets)| (strip_suffix(field).to_string(), snippets.clone()))
                .collect();
            Some((id.to_string(), fields))
        })
        .collect()
}

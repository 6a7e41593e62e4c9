//! Result parsing tests.

mod common;

use std::sync::Arc;

use serde_json::json;

use helios_solr::error::{ResultsError, SolrError};
use helios_solr::types::{
    FacetOptions, IndexSchema, RecordId, ResultFormat, SearchOptions, SolrResponse,
};
use helios_solr::{ResultParser, SearchResults};

use common::{MockFinder, Post, hit, response};

fn schema() -> IndexSchema {
    IndexSchema::new("Post").with_primary_key_field("pk_id")
}

fn two_hits() -> SolrResponse {
    SolrResponse::new(
        2,
        vec![
            hit("pk_id", json!(1), Some(2.1)),
            hit("pk_id", json!(2), Some(1.3)),
        ],
    )
    .with_max_score(2.1)
}

async fn parse(
    finder: &MockFinder,
    response: Option<&SolrResponse>,
    options: &SearchOptions,
) -> Result<SearchResults<Post>, SolrError> {
    let schema = schema();
    ResultParser::new(&schema, Arc::new(finder.clone()))
        .parse(response, options)
        .await
}

// ============================================================================
// Empty input
// ============================================================================

#[tokio::test]
async fn test_absent_response_yields_empty_results() {
    let finder = MockFinder::default();
    let results = parse(&finder, None, &SearchOptions::default()).await.unwrap();

    assert_eq!(results.total, 0);
    assert!(results.docs.is_empty());
    assert!(results.max_score.is_none());
    assert!(results.facets.is_none());
    assert!(results.highlighting.is_none());
    assert!(results.query_time.is_none());
    assert_eq!(finder.call_count(), 0);
}

#[tokio::test]
async fn test_empty_result_set() {
    let finder = MockFinder::default();
    let response = SolrResponse::new(0, vec![]);
    let results = parse(&finder, Some(&response), &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.total, 0);
    assert!(results.docs.is_empty());
    assert_eq!(finder.call_count(), 0);
}

// ============================================================================
// Header data
// ============================================================================

#[tokio::test]
async fn test_max_score_and_query_time() {
    let finder = MockFinder::default();
    let response = response(json!({
        "responseHeader": {"QTime": "10.2", "params": {"rows": "2", "start": "0"}},
        "response": {"numFound": 2, "maxScore": 2.1, "docs": []}
    }));
    let results = parse(&finder, Some(&response), &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.max_score, Some(2.1));
    assert_eq!(results.query_time, Some(10.2));
    assert_eq!(results.rows, Some(2));
    assert_eq!(results.current_page(), 1);
}

#[tokio::test]
async fn test_facets_only_when_requested() {
    let finder = MockFinder::default();
    let response = SolrResponse::new(0, vec![]).with_facets(json!(2));

    let results = parse(&finder, Some(&response), &SearchOptions::default())
        .await
        .unwrap();
    assert!(results.facets.is_none());

    let options = SearchOptions::new().with_facets(FacetOptions::default());
    let results = parse(&finder, Some(&response), &options).await.unwrap();
    assert_eq!(results.facets, Some(json!(2)));
}

#[tokio::test]
async fn test_highlighting() {
    let finder = MockFinder::with_records(vec![Post::new(1, "Car")]);
    let response = response(json!({
        "response": {"numFound": 1, "docs": [{"pk_id": 1}]},
        "highlighting": {"Post:1": {"title_t": ["a <em>car</em>"]}}
    }));
    let results = parse(&finder, Some(&response), &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(
        results.highlighting,
        Some(json!({"Post:1": {"title_t": ["a <em>car</em>"]}}))
    );
    let highlights = results.highlights_for(&RecordId::from(1)).unwrap();
    assert_eq!(highlights["title"], json!(["a <em>car</em>"]));
}

#[tokio::test]
async fn test_namespaced_highlight_keys() {
    let finder = MockFinder::with_records(vec![Post::new(1, "Car")]);
    let schema = IndexSchema::new("Blog::Post").with_primary_key_field("pk_id");
    let response = response(json!({
        "response": {"numFound": 1, "docs": [{"pk_id": 1}]},
        "highlighting": {"Blog::Post:1": {"title_t": ["a <em>car</em>"]}}
    }));
    let results: SearchResults<Post> = ResultParser::new(&schema, Arc::new(finder.clone()))
        .parse(Some(&response), &SearchOptions::default())
        .await
        .unwrap();

    let highlights = results.highlights_for(&RecordId::from(1)).unwrap();
    assert_eq!(highlights["title"], json!(["a <em>car</em>"]));
}

// ============================================================================
// Ids format
// ============================================================================

#[tokio::test]
async fn test_ids_format_returns_ids_without_lookup() {
    let finder = MockFinder::default();
    let options = SearchOptions::try_from(json!({"format": null})).unwrap();
    let results = parse(&finder, Some(&two_hits()), &options).await.unwrap();

    assert_eq!(
        results.docs.ids().unwrap(),
        &[RecordId::from(1), RecordId::from(2)]
    );
    assert_eq!(finder.call_count(), 0);
}

#[tokio::test]
async fn test_ids_format_ignores_lazy() {
    let finder = MockFinder::default();
    let options = SearchOptions::new()
        .with_format(ResultFormat::Ids)
        .with_lazy();
    let results = parse(&finder, Some(&two_hits()), &options).await.unwrap();

    assert_eq!(results.docs.ids().unwrap().len(), 2);
    assert!(results.docs.lazy().is_none());
}

// ============================================================================
// Objects format
// ============================================================================

#[tokio::test]
async fn test_objects_are_loaded_in_hit_order() {
    let finder = MockFinder::with_records(vec![Post::new(2, "Bike"), Post::new(1, "Car")]);
    let results = parse(&finder, Some(&two_hits()), &SearchOptions::default())
        .await
        .unwrap();

    let records = results.docs.records().unwrap();
    assert_eq!(records.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(records.iter().all(|p| p.solr_score.is_none()));

    let calls = finder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, vec![RecordId::from(1), RecordId::from(2)]);
    assert!(calls[0].1.include.is_empty());
}

#[tokio::test]
async fn test_include_is_passed_to_finder() {
    let finder = MockFinder::with_records(vec![Post::new(1, "Car"), Post::new(2, "Bike")]);
    let options = SearchOptions::new().with_include("author");
    parse(&finder, Some(&two_hits()), &options).await.unwrap();

    assert_eq!(finder.calls()[0].1.include, vec!["author".to_string()]);
}

#[tokio::test]
async fn test_scores_are_merged() {
    let finder = MockFinder::with_records(vec![Post::new(2, "Bike"), Post::new(1, "Car")]);
    let options = SearchOptions::new().with_scores();
    let results = parse(&finder, Some(&two_hits()), &options).await.unwrap();

    let records = results.docs.records().unwrap();
    assert_eq!(records[0].solr_score, Some(2.1));
    assert_eq!(records[1].solr_score, Some(1.3));
}

#[tokio::test]
async fn test_missing_records_are_out_of_sync() {
    let finder = MockFinder::with_records(vec![Post::new(1, "Car")]);
    let err = parse(&finder, Some(&two_hits()), &SearchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SolrError::Results(ResultsError::LengthMismatch { records: 1, ids: 2 })
    ));
}

// ============================================================================
// Lazy format
// ============================================================================

#[tokio::test]
async fn test_lazy_documents() {
    let finder = MockFinder::with_records(vec![Post::new(1, "Car"), Post::new(2, "Bike")]);
    let options = SearchOptions::new().with_lazy().with_scores();
    let results = parse(&finder, Some(&two_hits()), &options).await.unwrap();

    let docs = results.docs.lazy().unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id(), &RecordId::from(1));
    assert_eq!(finder.call_count(), 0);

    let post = docs[0].resolve().await.unwrap();
    assert_eq!(post.title, "Car");
    assert_eq!(post.solr_score, Some(2.1));
    docs[0].resolve().await.unwrap();
    assert_eq!(finder.call_count(), 1);
    assert_eq!(finder.calls()[0].0, vec![RecordId::from(1)]);
}

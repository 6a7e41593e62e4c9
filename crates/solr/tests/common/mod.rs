//! Test infrastructure for the Solr integration.
//!
//! Provides mock collaborators that record their calls, and a simple record
//! type used as the search target.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use helios_solr::core::{FindOptions, Identifiable, RecordFinder, Scorable, SolrExecutor};
use helios_solr::error::{BackendError, SolrResult};
use helios_solr::types::{RecordId, SolrHit, SolrRequest, SolrResponse};

/// A post record.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub solr_score: Option<f64>,
}

impl Post {
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            solr_score: None,
        }
    }
}

impl Identifiable for Post {
    fn attribute(&self, name: &str) -> Option<RecordId> {
        match name {
            "id" | "pk_id" => Some(RecordId::from(self.id)),
            _ => None,
        }
    }
}

impl Scorable for Post {
    fn set_solr_score(&mut self, score: f64) {
        self.solr_score = Some(score);
    }

    fn solr_score(&self) -> Option<f64> {
        self.solr_score
    }
}

#[derive(Debug, Default)]
struct ExecutorState {
    requests: Vec<(SolrRequest, Option<String>)>,
    response: Option<SolrResponse>,
    fail: bool,
}

/// An executor returning a canned response and recording every request.
#[derive(Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<ExecutorState>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: SolrResponse) -> Self {
        let executor = Self::new();
        executor.state.lock().unwrap().response = Some(response);
        executor
    }

    pub fn failing() -> Self {
        let executor = Self::new();
        executor.state.lock().unwrap().fail = true;
        executor
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> SolrRequest {
        self.state.lock().unwrap().requests.last().unwrap().0.clone()
    }

    pub fn last_core(&self) -> Option<String> {
        self.state.lock().unwrap().requests.last().unwrap().1.clone()
    }
}

#[async_trait]
impl SolrExecutor for MockExecutor {
    async fn execute(&self, request: &SolrRequest, core: Option<&str>) -> SolrResult<SolrResponse> {
        let mut state = self.state.lock().unwrap();
        state
            .requests
            .push((request.clone(), core.map(str::to_string)));
        if state.fail {
            return Err(BackendError::Unavailable {
                backend_name: "solr".to_string(),
                message: "connection refused".to_string(),
            }
            .into());
        }
        Ok(state.response.clone().unwrap_or_default())
    }
}

#[derive(Debug, Default)]
struct FinderState {
    records: Vec<Post>,
    calls: Vec<(Vec<RecordId>, FindOptions)>,
}

/// A finder over an in-memory set of posts, returned in storage order.
#[derive(Clone, Default)]
pub struct MockFinder {
    state: Arc<Mutex<FinderState>>,
}

impl MockFinder {
    pub fn with_records(records: Vec<Post>) -> Self {
        let finder = Self::default();
        finder.state.lock().unwrap().records = records;
        finder
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn calls(&self) -> Vec<(Vec<RecordId>, FindOptions)> {
        self.state.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl RecordFinder for MockFinder {
    type Record = Post;

    async fn find_by_ids(&self, ids: &[RecordId], options: &FindOptions) -> SolrResult<Vec<Post>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((ids.to_vec(), options.clone()));
        Ok(state
            .records
            .iter()
            .filter(|post| ids.contains(&RecordId::from(post.id)))
            .cloned()
            .collect())
    }
}

/// Builds a hit with the given primary key and score.
pub fn hit(pk_field: &str, id: Value, score: Option<f64>) -> SolrHit {
    let mut value = json!({ pk_field: id });
    if let Some(score) = score {
        value["score"] = json!(score);
    }
    SolrHit::from_value(value)
}

/// Builds a decoded response from raw JSON.
pub fn response(value: Value) -> SolrResponse {
    SolrResponse::from_json(value).unwrap()
}

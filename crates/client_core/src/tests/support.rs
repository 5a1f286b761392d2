use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use shared::{
    domain::{SearchQuery, UploadRequest},
    error::ClientError,
    protocol::SearchResultItem,
};
use tokio::sync::{Mutex, Notify};

use crate::IndexBackend;

/// In-memory backend with canned answers that counts every call.
pub(crate) struct ScriptedBackend {
    upload_result: Result<String, ClientError>,
    search_result: Result<Vec<SearchResultItem>, ClientError>,
    areas_result: Result<Vec<String>, ClientError>,
    gate: Option<Arc<Notify>>,
    areas_hang: bool,
    pub upload_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub area_calls: AtomicUsize,
    pub uploaded: Mutex<Vec<UploadRequest>>,
    pub queries: Mutex<Vec<SearchQuery>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            upload_result: Ok("uploaded".to_string()),
            search_result: Ok(Vec::new()),
            areas_result: Ok(Vec::new()),
            gate: None,
            areas_hang: false,
            upload_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            area_calls: AtomicUsize::new(0),
            uploaded: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_upload(mut self, result: Result<String, ClientError>) -> Self {
        self.upload_result = result;
        self
    }

    pub fn with_search(mut self, result: Result<Vec<SearchResultItem>, ClientError>) -> Self {
        self.search_result = result;
        self
    }

    pub fn with_areas(mut self, result: Result<Vec<String>, ClientError>) -> Self {
        self.areas_result = result;
        self
    }

    /// `functional_areas` never answers.
    pub fn with_hanging_areas(mut self) -> Self {
        self.areas_hang = true;
        self
    }

    /// Upload and search calls block until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn area_fetches(&self) -> usize {
        self.area_calls.load(Ordering::SeqCst)
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl IndexBackend for ScriptedBackend {
    async fn upload(&self, request: UploadRequest) -> Result<String, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().await.push(request);
        self.wait_gate().await;
        self.upload_result.clone()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultItem>, ClientError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().await.push(query.clone());
        self.wait_gate().await;
        self.search_result.clone()
    }

    async fn functional_areas(&self) -> Result<Vec<String>, ClientError> {
        self.area_calls.fetch_add(1, Ordering::SeqCst);
        if self.areas_hang {
            std::future::pending::<()>().await;
        }
        self.areas_result.clone()
    }

    async fn health(&self) -> Result<String, ClientError> {
        Ok("ok".to_string())
    }
}

pub(crate) fn sample_file() -> UploadRequest {
    UploadRequest::new(
        "inquiries.xlsx",
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string()),
        b"PK\x03\x04 spreadsheet bytes".to_vec(),
    )
}

pub(crate) fn item(similarity: f64, id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        similarity,
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        category_label: Some("Login".to_string()),
        detail: Some("detail".to_string()),
    }
}

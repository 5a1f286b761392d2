use std::sync::Arc;

use shared::{
    domain::UploadRequest,
    error::{ClientError, ErrorKind},
};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    categories::CategoryRegistry,
    state::{Failure, Outcome, Panel, PanelState},
    IndexBackend,
};

pub const NO_FILE_SELECTED: &str = "no file selected";
pub const UPLOAD_MALFORMED_FALLBACK: &str = "upload failed: unexpected response from server";
pub const UPLOAD_UNREACHABLE_FALLBACK: &str = "upload failed: server unreachable";

/// Drives the ingestion form. The panel payload is the backend's success message.
pub struct UploadController {
    backend: Arc<dyn IndexBackend>,
    categories: Arc<CategoryRegistry>,
    panel: Panel<String>,
    category_refresh: Mutex<Option<JoinHandle<()>>>,
}

impl UploadController {
    pub fn new(backend: Arc<dyn IndexBackend>, categories: Arc<CategoryRegistry>) -> Self {
        Self {
            backend,
            categories,
            panel: Panel::new(),
            category_refresh: Mutex::new(None),
        }
    }

    pub fn state(&self) -> PanelState<String> {
        self.panel.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState<String>> {
        self.panel.subscribe()
    }

    pub async fn submit(&self, file: Option<UploadRequest>) -> Outcome<String> {
        if !self.panel.begin() {
            debug!("upload: submit ignored while a previous upload is in flight");
            return Outcome::Busy;
        }

        let Some(request) = file.filter(|request| !request.is_empty()) else {
            return self
                .panel
                .fail(Failure::new(ErrorKind::LocalValidation, NO_FILE_SELECTED));
        };

        let file_name = request.file_name.clone();
        match self.backend.upload(request).await {
            Ok(message) => {
                info!(%file_name, %message, "upload: accepted");
                let outcome = self.panel.succeed(message);
                self.spawn_category_refresh().await;
                outcome
            }
            Err(error) => {
                warn!(%file_name, kind = ?error.kind(), %error, "upload: failed");
                self.panel.fail(upload_failure(&error))
            }
        }
    }

    /// Waits for the category refresh started by the last successful upload.
    pub async fn wait_for_category_refresh(&self) {
        let handle = self.category_refresh.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    // Detached: the upload outcome never waits on the category listing.
    async fn spawn_category_refresh(&self) {
        let categories = self.categories.clone();
        let handle = tokio::spawn(async move {
            if let Err(error) = categories.refresh().await {
                warn!(%error, "upload: category refresh after upload failed");
            }
        });
        *self.category_refresh.lock().await = Some(handle);
    }
}

fn upload_failure(error: &ClientError) -> Failure {
    let message = match error {
        ClientError::LocalValidation(message) => message.clone(),
        ClientError::BackendRejection { detail, .. } => detail.clone(),
        ClientError::MalformedResponse { .. } => UPLOAD_MALFORMED_FALLBACK.to_string(),
        ClientError::Transport(_) => UPLOAD_UNREACHABLE_FALLBACK.to_string(),
    };
    Failure::new(error.kind(), message)
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;

use std::path::Path;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{SearchQuery, UploadRequest},
    error::ClientError,
    protocol::{
        ErrorBody, HealthResponse, SearchResultItem, UploadResponse, FUNCTIONAL_AREAS_PATH,
        HEALTH_PATH, SEARCH_PATH, UPLOAD_FIELD, UPLOAD_PATH,
    },
};
use tracing::{debug, info};

pub mod categories;
pub mod render;
pub mod search;
pub mod shell;
pub mod state;
pub mod upload;

pub use categories::CategoryRegistry;
pub use render::{render, DetailMarkup, ResultRow, ResultsView, NO_MATCHES_NOTICE};
pub use search::SearchController;
pub use shell::{AppShell, UiAction, UiCommand, UiUpdate};
pub use state::{Failure, Outcome, Panel, PanelState};
pub use upload::UploadController;

/// The indexing service as seen from the client: one call per endpoint.
#[async_trait]
pub trait IndexBackend: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<String, ClientError>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultItem>, ClientError>;
    async fn functional_areas(&self) -> Result<Vec<String>, ClientError>;
    async fn health(&self) -> Result<String, ClientError>;
}

pub struct HttpIndexBackend {
    http: Client,
    server_url: String,
}

impl HttpIndexBackend {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

#[async_trait]
impl IndexBackend for HttpIndexBackend {
    async fn upload(&self, request: UploadRequest) -> Result<String, ClientError> {
        let size_bytes = request.bytes.len();
        let part = multipart::Part::bytes(request.bytes)
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .map_err(|error| {
                ClientError::validation(format!(
                    "invalid content type '{}': {error}",
                    request.content_type
                ))
            })?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        info!(file_name = %request.file_name, size_bytes, "upload: posting document");
        let response = self
            .http
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let body: UploadResponse = read_json(response).await?;
        Ok(body.message)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultItem>, ClientError> {
        debug!(
            keywords = %query.keywords,
            functional_area = %query.functional_area,
            "search: querying index"
        );
        let response = self
            .http
            .get(self.endpoint(SEARCH_PATH))
            .query(&[
                ("keywords", query.keywords.as_str()),
                ("functional_area", query.functional_area.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn functional_areas(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(FUNCTIONAL_AREAS_PATH))
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn health(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(transport)?;
        let body: HealthResponse = read_json(response).await?;
        Ok(body.status)
    }
}

/// Content type for an upload, guessed from the file extension.
pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(Path::new(file_name))
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn transport(error: reqwest::Error) -> ClientError {
    ClientError::Transport(error.to_string())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(|error| {
            debug!(status = status.as_u16(), %error, "response body did not match expected shape");
            ClientError::MalformedResponse {
                status: status.as_u16(),
            }
        });
    }

    match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => Err(ClientError::BackendRejection {
            status: status.as_u16(),
            detail,
        }),
        _ => Err(ClientError::MalformedResponse {
            status: status.as_u16(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

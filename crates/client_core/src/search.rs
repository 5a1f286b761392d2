use std::sync::Arc;

use shared::{
    domain::{CategoryList, SearchQuery},
    error::{ClientError, ErrorKind},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    categories::CategoryRegistry,
    render::{render, ResultsView},
    state::{Failure, Outcome, Panel, PanelState},
    IndexBackend,
};

pub const EMPTY_KEYWORDS: &str = "please enter search keywords";
pub const SEARCH_MALFORMED_FALLBACK: &str = "search failed: unexpected response from server";
pub const SEARCH_UNREACHABLE_FALLBACK: &str = "search failed, check server";

/// Drives the query form and hands results to the renderer.
pub struct SearchController {
    backend: Arc<dyn IndexBackend>,
    categories: Arc<CategoryRegistry>,
    panel: Panel<ResultsView>,
}

impl SearchController {
    pub fn new(backend: Arc<dyn IndexBackend>, categories: Arc<CategoryRegistry>) -> Self {
        Self {
            backend,
            categories,
            panel: Panel::new(),
        }
    }

    pub fn state(&self) -> PanelState<ResultsView> {
        self.panel.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState<ResultsView>> {
        self.panel.subscribe()
    }

    /// Choices for the filter dropdown.
    pub fn categories(&self) -> CategoryList {
        self.categories.current()
    }

    pub async fn submit(&self, query: SearchQuery) -> Outcome<ResultsView> {
        if !self.panel.begin() {
            debug!("search: submit ignored while a previous search is in flight");
            return Outcome::Busy;
        }

        let keywords = query.trimmed_keywords().to_string();
        if keywords.is_empty() {
            return self
                .panel
                .fail(Failure::new(ErrorKind::LocalValidation, EMPTY_KEYWORDS));
        }
        let query = SearchQuery::new(keywords, query.functional_area);

        match self.backend.search(&query).await {
            Ok(items) => {
                info!(
                    keywords = %query.keywords,
                    functional_area = %query.functional_area,
                    results = items.len(),
                    "search: completed"
                );
                self.panel.succeed(render(&items))
            }
            Err(error) => {
                warn!(kind = ?error.kind(), %error, "search: failed");
                self.panel.fail(search_failure(&error))
            }
        }
    }
}

fn search_failure(error: &ClientError) -> Failure {
    let message = match error {
        ClientError::LocalValidation(message) => message.clone(),
        ClientError::BackendRejection { detail, .. } => format!("search failed: {detail}"),
        ClientError::MalformedResponse { .. } => SEARCH_MALFORMED_FALLBACK.to_string(),
        ClientError::Transport(_) => SEARCH_UNREACHABLE_FALLBACK.to_string(),
    };
    Failure::new(error.kind(), message)
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;

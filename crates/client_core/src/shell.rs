//! Named UI actions bound to the controllers.

use std::{fmt, str::FromStr, sync::Arc};

use shared::domain::{CategoryList, SearchQuery, UploadRequest};
use tracing::debug;

use crate::{
    categories::CategoryRegistry, render::ResultsView, search::SearchController, state::Outcome,
    upload::UploadController, IndexBackend,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    SubmitUpload,
    SubmitSearch,
    RefreshCategories,
}

impl UiAction {
    pub const ALL: [UiAction; 3] = [
        UiAction::SubmitUpload,
        UiAction::SubmitSearch,
        UiAction::RefreshCategories,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UiAction::SubmitUpload => "submit-upload",
            UiAction::SubmitSearch => "submit-search",
            UiAction::RefreshCategories => "refresh-categories",
        }
    }
}

impl fmt::Display for UiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UiAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiAction::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown ui action '{s}'"))
    }
}

pub enum UiCommand {
    SubmitUpload(Option<UploadRequest>),
    SubmitSearch(SearchQuery),
    RefreshCategories,
}

impl UiCommand {
    pub fn action(&self) -> UiAction {
        match self {
            UiCommand::SubmitUpload(_) => UiAction::SubmitUpload,
            UiCommand::SubmitSearch(_) => UiAction::SubmitSearch,
            UiCommand::RefreshCategories => UiAction::RefreshCategories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Upload(Outcome<String>),
    Search(Outcome<ResultsView>),
    Categories(CategoryList),
}

/// Owns the controllers for one page. Upload and search act on separate
/// panels and may run concurrently.
pub struct AppShell {
    categories: Arc<CategoryRegistry>,
    upload: UploadController,
    search: SearchController,
}

impl AppShell {
    pub fn new(backend: Arc<dyn IndexBackend>, any_label: impl Into<String>) -> Self {
        let categories = Arc::new(CategoryRegistry::new(backend.clone(), any_label));
        Self {
            upload: UploadController::new(backend.clone(), categories.clone()),
            search: SearchController::new(backend, categories.clone()),
            categories,
        }
    }

    pub fn upload(&self) -> &UploadController {
        &self.upload
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Page-load category fetch. Failures leave the sentinel-only list.
    pub async fn load(&self) -> CategoryList {
        self.refresh_categories().await
    }

    pub async fn dispatch(&self, command: UiCommand) -> UiUpdate {
        debug!(action = %command.action(), "dispatching ui action");
        match command {
            UiCommand::SubmitUpload(file) => UiUpdate::Upload(self.upload.submit(file).await),
            UiCommand::SubmitSearch(query) => UiUpdate::Search(self.search.submit(query).await),
            UiCommand::RefreshCategories => UiUpdate::Categories(self.refresh_categories().await),
        }
    }

    async fn refresh_categories(&self) -> CategoryList {
        match self.categories.refresh().await {
            Ok(list) => list,
            Err(_) => self.categories.current(),
        }
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;

use std::sync::Arc;

use shared::{domain::CategoryList, error::ClientError};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::IndexBackend;

/// Cached category filter choices. Written only by [`CategoryRegistry::refresh`].
pub struct CategoryRegistry {
    backend: Arc<dyn IndexBackend>,
    any_label: String,
    tx: watch::Sender<CategoryList>,
}

impl CategoryRegistry {
    pub fn new(backend: Arc<dyn IndexBackend>, any_label: impl Into<String>) -> Self {
        let any_label = any_label.into();
        let (tx, _rx) = watch::channel(CategoryList::with_sentinel(any_label.clone()));
        Self {
            backend,
            any_label,
            tx,
        }
    }

    pub fn current(&self) -> CategoryList {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CategoryList> {
        self.tx.subscribe()
    }

    /// Replaces the whole list with the sentinel plus the fetched labels.
    /// On failure the current list is kept and the error is only logged here;
    /// callers decide whether to look at it.
    pub async fn refresh(&self) -> Result<CategoryList, ClientError> {
        match self.backend.functional_areas().await {
            Ok(labels) => {
                let list = CategoryList::from_labels(self.any_label.clone(), labels);
                info!(count = list.fetched().len(), "categories: refreshed");
                self.tx.send_replace(list.clone());
                Ok(list)
            }
            Err(error) => {
                warn!(kind = ?error.kind(), %error, "categories: refresh failed, keeping previous list");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/categories_tests.rs"]
mod tests;

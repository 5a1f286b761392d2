use serde::{Deserialize, Serialize};

/// Label the service itself treats as "no filter".
pub const ANY_CATEGORY_LABEL: &str = "すべて";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keywords: String,
    /// Empty means unfiltered.
    #[serde(default)]
    pub functional_area: String,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>, functional_area: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            functional_area: functional_area.into(),
        }
    }

    pub fn trimmed_keywords(&self) -> &str {
        self.keywords.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    /// Value sent as `functional_area`; empty for the sentinel.
    pub filter: String,
}

impl Category {
    pub fn any(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            filter: String::new(),
        }
    }

    pub fn named(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            filter: label.clone(),
            label,
        }
    }
}

/// Selectable categories. The sentinel is always entry zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
    entries: Vec<Category>,
}

impl CategoryList {
    pub fn with_sentinel(any_label: impl Into<String>) -> Self {
        Self {
            entries: vec![Category::any(any_label)],
        }
    }

    /// Builds a fresh list; labels are kept in order and not deduplicated.
    pub fn from_labels<I, S>(any_label: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::with_sentinel(any_label);
        list.entries.extend(labels.into_iter().map(Category::named));
        list
    }

    pub fn sentinel(&self) -> &Category {
        &self.entries[0]
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Fetched entries, sentinel excluded.
    pub fn fetched(&self) -> &[Category] {
        &self.entries[1..]
    }

    pub fn find(&self, label: &str) -> Option<&Category> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Filter value for a selected label. Labels not in the list are sent as typed.
    pub fn filter_for(&self, label: &str) -> String {
        self.find(label)
            .map_or_else(|| label.to_string(), |category| category.filter.clone())
    }
}

impl Default for CategoryList {
    fn default() -> Self {
        Self::with_sentinel(ANY_CATEGORY_LABEL)
    }
}

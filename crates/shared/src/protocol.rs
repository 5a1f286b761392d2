//! Wire shapes of the indexing service endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UPLOAD_PATH: &str = "/api/upload";
pub const SEARCH_PATH: &str = "/api/search";
pub const FUNCTIONAL_AREAS_PATH: &str = "/api/functional-areas";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

/// Body of every non-2xx response. The service does not always send one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// One ranked row of `/api/search`. Rows carry every spreadsheet column;
/// only the displayed ones are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub similarity: f64,
    #[serde(rename = "ID", default, deserialize_with = "text_cell")]
    pub id: Option<String>,
    #[serde(rename = "タイトル", default, deserialize_with = "text_cell")]
    pub title: Option<String>,
    #[serde(rename = "画面名称", default, deserialize_with = "text_cell")]
    pub category_label: Option<String>,
    #[serde(rename = "詳細", default, deserialize_with = "text_cell")]
    pub detail: Option<String>,
}

impl SearchResultItem {
    pub fn new(similarity: f64) -> Self {
        Self {
            similarity,
            id: None,
            title: None,
            category_label: None,
            detail: None,
        }
    }
}

// Spreadsheet cells come back as strings, numbers or null depending on the column.
fn text_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    })
}

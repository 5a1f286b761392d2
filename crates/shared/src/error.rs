use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    LocalValidation,
    BackendRejection,
    MalformedResponse,
    Transport,
}

/// Everything that can go wrong between a submitted form and a rendered panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Input failed a precondition; nothing was sent.
    #[error("{0}")]
    LocalValidation(String),
    /// The backend answered non-2xx with a readable `detail`.
    #[error("backend rejected request with status {status}: {detail}")]
    BackendRejection { status: u16, detail: String },
    /// The backend answered but the body could not be interpreted.
    #[error("unexpected response from server (status {status})")]
    MalformedResponse { status: u16 },
    /// The request never completed.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::LocalValidation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LocalValidation(_) => ErrorKind::LocalValidation,
            Self::BackendRejection { .. } => ErrorKind::BackendRejection,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

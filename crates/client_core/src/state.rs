//! Panel state machine shared by the controllers.
//!
//! Each controller owns one [`Panel`]; presentation code subscribes to it and
//! redraws on every transition without knowing anything about the workflow.

use shared::error::ErrorKind;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState<T> {
    #[default]
    Idle,
    InFlight,
    Success(T),
    Failed(Failure),
}

impl<T> PanelState<T> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result of one submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failed(Failure),
    /// A submit on the same panel was still in flight; nothing was sent.
    Busy,
}

impl<T> Outcome<T> {
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

pub struct Panel<T> {
    tx: watch::Sender<PanelState<T>>,
}

impl<T: Clone> Panel<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PanelState::Idle);
        Self { tx }
    }

    pub fn current(&self) -> PanelState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState<T>> {
        self.tx.subscribe()
    }

    /// Moves to `InFlight`. Returns false when the panel already was.
    pub fn begin(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if state.is_in_flight() {
                return false;
            }
            *state = PanelState::InFlight;
            true
        })
    }

    pub fn succeed(&self, value: T) -> Outcome<T> {
        self.tx.send_replace(PanelState::Success(value.clone()));
        Outcome::Success(value)
    }

    pub fn fail(&self, failure: Failure) -> Outcome<T> {
        self.tx.send_replace(PanelState::Failed(failure.clone()));
        Outcome::Failed(failure)
    }
}

impl<T: Clone> Default for Panel<T> {
    fn default() -> Self {
        Self::new()
    }
}

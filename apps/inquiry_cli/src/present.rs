//! Turns panel outcomes into terminal output.

use client_core::{DetailMarkup, Outcome, PanelState, ResultsView};
use shared::domain::CategoryList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub is_error: bool,
}

impl Report {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    Text,
    Html(DetailMarkup),
}

pub fn upload_report(outcome: &Outcome<String>) -> Report {
    match outcome {
        Outcome::Success(message) => Report::ok(message.clone()),
        Outcome::Failed(failure) => Report::error(failure.message.clone()),
        Outcome::Busy => Report::error("an upload is already in progress"),
    }
}

pub fn search_report(outcome: &Outcome<ResultsView>, format: ResultFormat) -> Report {
    match outcome {
        Outcome::Success(view) => Report::ok(match format {
            ResultFormat::Text => view.to_text(),
            ResultFormat::Html(markup) => view.to_html(markup),
        }),
        Outcome::Failed(failure) => Report::error(failure.message.clone()),
        Outcome::Busy => Report::error("a search is already in progress"),
    }
}

pub fn categories_report(list: &CategoryList) -> Report {
    Report::ok(list.labels().collect::<Vec<_>>().join("\n"))
}

/// Progress line for a panel transition, if it has one.
pub fn progress_line<T>(panel: &str, state: &PanelState<T>) -> Option<String> {
    state
        .is_in_flight()
        .then(|| format!("{panel}: in progress..."))
}

#[cfg(test)]
#[path = "tests/present_tests.rs"]
mod tests;

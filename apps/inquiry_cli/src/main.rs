use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    guess_content_type, AppShell, DetailMarkup, HttpIndexBackend, IndexBackend, PanelState,
    UiCommand, UiUpdate,
};
use present::{
    categories_report, progress_line, search_report, upload_report, Report, ResultFormat,
};
use shared::domain::{SearchQuery, UploadRequest};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod present;

#[derive(Parser, Debug)]
#[command(name = "inquiry", about = "Upload inquiry spreadsheets and search them by keyword")]
struct Args {
    /// Base URL of the indexing service.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Settings file; defaults to ./inquiry.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a document for ingestion.
    Upload {
        file: Option<PathBuf>,
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Search by keywords, optionally filtered by functional area.
    Search {
        keywords: Vec<String>,
        #[arg(long, default_value = "")]
        area: String,
        /// Print an HTML table instead of tab-separated text.
        #[arg(long)]
        html: bool,
        /// Emit the detail column without escaping (implies --html).
        #[arg(long)]
        trusted_detail: bool,
    },
    /// List selectable functional areas.
    Categories,
    /// Check that the service answers.
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = config::normalize_server_url(server_url)?;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    info!(server_url = %settings.server_url, "inquiry client starting");

    let backend = Arc::new(HttpIndexBackend::new(settings.server_url.clone()));
    let shell = AppShell::new(backend.clone(), settings.any_category_label.clone());

    let report = match args.command {
        Command::Upload { file, content_type } => {
            let request = match file {
                Some(path) => Some(read_upload(path, content_type).await?),
                None => None,
            };
            follow_progress("upload", shell.upload().subscribe());
            match shell.dispatch(UiCommand::SubmitUpload(request)).await {
                UiUpdate::Upload(outcome) => upload_report(&outcome),
                other => unexpected(other),
            }
        }
        Command::Search {
            keywords,
            area,
            html,
            trusted_detail,
        } => {
            let functional_area = shell.categories().current().filter_for(&area);
            let format = if trusted_detail {
                ResultFormat::Html(DetailMarkup::Trusted)
            } else if html {
                ResultFormat::Html(if settings.trusted_detail_markup {
                    DetailMarkup::Trusted
                } else {
                    DetailMarkup::Escaped
                })
            } else {
                ResultFormat::Text
            };
            let query = SearchQuery::new(keywords.join(" "), functional_area);
            follow_progress("search", shell.search().subscribe());
            match shell.dispatch(UiCommand::SubmitSearch(query)).await {
                UiUpdate::Search(outcome) => search_report(&outcome, format),
                other => unexpected(other),
            }
        }
        Command::Categories => match shell.dispatch(UiCommand::RefreshCategories).await {
            UiUpdate::Categories(list) => categories_report(&list),
            other => unexpected(other),
        },
        Command::Health => match backend.health().await {
            Ok(status) => Report {
                text: status,
                is_error: false,
            },
            Err(error) => Report {
                text: format!("health check failed: {error}"),
                is_error: true,
            },
        },
    };

    if report.is_error {
        eprintln!("{}", report.text);
        Ok(ExitCode::FAILURE)
    } else {
        println!("{}", report.text);
        Ok(ExitCode::SUCCESS)
    }
}

async fn read_upload(path: PathBuf, content_type: Option<String>) -> Result<UploadRequest> {
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("'{}' has no file name", path.display()))?;
    let content_type = content_type.unwrap_or_else(|| guess_content_type(&file_name));
    Ok(UploadRequest::new(file_name, Some(content_type), bytes))
}

/// Prints a progress line whenever the panel goes in flight.
fn follow_progress<T: Send + Sync + 'static>(
    panel: &'static str,
    mut rx: watch::Receiver<PanelState<T>>,
) {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let line = progress_line(panel, &*rx.borrow_and_update());
            if let Some(line) = line {
                eprintln!("{line}");
            }
        }
    });
}

fn unexpected(update: UiUpdate) -> Report {
    error!(?update, "ui action produced an update for another panel");
    Report {
        text: "internal error: unexpected panel update".to_string(),
        is_error: true,
    }
}

use super::*;
use client_core::{render, Failure};
use shared::{domain::ANY_CATEGORY_LABEL, error::ErrorKind, protocol::SearchResultItem};

#[test]
fn upload_success_and_failure() {
    assert_eq!(
        upload_report(&Outcome::Success("indexed 3 docs".to_string())),
        Report::ok("indexed 3 docs")
    );
    assert_eq!(
        upload_report(&Outcome::Failed(Failure::new(
            ErrorKind::LocalValidation,
            "no file selected"
        ))),
        Report::error("no file selected")
    );
}

#[test]
fn empty_search_prints_notice_not_error() {
    let report = search_report(&Outcome::Success(render(&[])), ResultFormat::Text);
    assert_eq!(report, Report::ok("no matches"));
}

#[test]
fn html_format_uses_requested_markup() {
    let mut item = SearchResultItem::new(0.25);
    item.detail = Some("<b>x</b>".to_string());
    let outcome = Outcome::Success(render(&[item]));

    let escaped = search_report(&outcome, ResultFormat::Html(DetailMarkup::Escaped));
    let trusted = search_report(&outcome, ResultFormat::Html(DetailMarkup::Trusted));

    assert!(escaped.text.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(trusted.text.contains("<b>x</b>"));
}

#[test]
fn categories_list_sentinel_first() {
    let list = CategoryList::from_labels(ANY_CATEGORY_LABEL, ["Login"]);
    assert_eq!(
        categories_report(&list).text,
        format!("{ANY_CATEGORY_LABEL}\nLogin")
    );
}

#[test]
fn progress_only_for_in_flight() {
    assert_eq!(
        progress_line::<String>("upload", &PanelState::InFlight),
        Some("upload: in progress...".to_string())
    );
    assert_eq!(progress_line::<String>("upload", &PanelState::Idle), None);
}

//! Pure mapping from ranked search rows to something a UI can show.

use shared::protocol::SearchResultItem;

pub const NO_MATCHES_NOTICE: &str = "no matches";
pub const COLUMNS: [&str; 5] = ["similarity", "ID", "タイトル", "画面名称", "詳細"];

/// How the `詳細` column is emitted in HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMarkup {
    #[default]
    Escaped,
    /// Backend-authored markup is passed through as-is.
    Trusted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub similarity: String,
    pub id: String,
    pub title: String,
    pub category: String,
    pub detail: String,
}

impl ResultRow {
    fn from_item(item: &SearchResultItem) -> Self {
        Self {
            similarity: format!("{:.4}", item.similarity),
            id: item.id.clone().unwrap_or_default(),
            title: item.title.clone().unwrap_or_default(),
            category: item.category_label.clone().unwrap_or_default(),
            detail: item.detail.clone().unwrap_or_default(),
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            self.similarity.as_str(),
            self.id.as_str(),
            self.title.as_str(),
            self.category.as_str(),
            self.detail.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    NoMatches,
    /// Rows in backend order.
    Table(Vec<ResultRow>),
}

impl ResultsView {
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            Self::NoMatches => &[],
            Self::Table(rows) => rows,
        }
    }

    pub fn to_text(&self) -> String {
        let Self::Table(rows) = self else {
            return NO_MATCHES_NOTICE.to_string();
        };

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(COLUMNS.join("\t"));
        for row in rows {
            let cells: Vec<String> = row.cells().into_iter().map(flatten).collect();
            lines.push(cells.join("\t"));
        }
        lines.join("\n")
    }

    pub fn to_html(&self, markup: DetailMarkup) -> String {
        let Self::Table(rows) = self else {
            return format!(r#"<p class="no-matches">{NO_MATCHES_NOTICE}</p>"#);
        };

        let mut html = String::from("<table><thead><tr>");
        for column in COLUMNS {
            html.push_str(&format!("<th>{}</th>", html_escape(column)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in rows {
            html.push_str("<tr>");
            for cell in [&row.similarity, &row.id, &row.title, &row.category] {
                html.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            let detail = match markup {
                DetailMarkup::Escaped => html_escape(&row.detail),
                DetailMarkup::Trusted => row.detail.clone(),
            };
            html.push_str(&format!("<td>{detail}</td></tr>"));
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// Maps backend rows to a view. Same input, same output.
pub fn render(items: &[SearchResultItem]) -> ResultsView {
    if items.is_empty() {
        return ResultsView::NoMatches;
    }
    ResultsView::Table(items.iter().map(ResultRow::from_item).collect())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Tabs and newlines would break the column layout of the text view.
fn flatten(cell: &str) -> String {
    cell.split(['\t', '\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;

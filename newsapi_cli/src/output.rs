use anyhow::Result;
use newsapi::types::{Article, NewsResponse};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const MAX_TITLE_CHARS: usize = 80;

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Unknown values fall back to the table layout.
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct ArticleRow {
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "URL")]
    url: String,
}

fn build_article_rows(articles: &[Article]) -> Vec<ArticleRow> {
    articles
        .iter()
        .map(|a| ArticleRow {
            published: a.published_at.format("%Y-%m-%d %H:%M").to_string(),
            source: a
                .source
                .name
                .clone()
                .or_else(|| a.source.id.clone())
                .unwrap_or_default(),
            title: truncate_chars(a.title.as_deref().unwrap_or(""), MAX_TITLE_CHARS),
            url: a.url.clone().unwrap_or_default(),
        })
        .collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn print_articles(resp: &NewsResponse, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(build_article_rows(&resp.articles)));
        }
        OutputFormat::Markdown => {
            let mut table = Table::new(build_article_rows(&resp.articles));
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(resp)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_headlines_fixture() -> NewsResponse {
        let json_str = include_str!("../../newsapi/tests/fixtures/headlines.json");
        NewsResponse::from_json(json_str).unwrap()
    }

    #[test]
    fn test_output_format_from_arg() {
        assert_eq!(OutputFormat::from_arg("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_arg("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_arg("markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_arg("csv"), OutputFormat::Table);
    }

    #[test]
    fn test_build_article_rows_mapping() {
        let resp = load_headlines_fixture();
        let rows = build_article_rows(&resp.articles);
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.published, "2023-06-09 13:00");
        assert_eq!(row.source, "Associated Press");
        assert_eq!(row.title, "Markets open higher");
        assert_eq!(row.url, "https://apnews.com/article/1");
    }

    #[test]
    fn test_build_article_rows_missing_fields() {
        let resp = load_headlines_fixture();
        let rows = build_article_rows(&resp.articles);
        assert_eq!(rows[1].source, "CNBC");
        assert_eq!(rows[1].published, "2023-06-09 12:30");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 80), "short");
        let long = "ü".repeat(100);
        let cut = truncate_chars(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_markdown_table_has_headers() {
        let resp = load_headlines_fixture();
        let mut table = Table::new(build_article_rows(&resp.articles));
        table.with(Style::markdown());
        let rendered = table.to_string();
        assert!(rendered.contains("| Published"));
        assert!(rendered.contains("Fed holds rates"));
    }
}

use anyhow::Result;
use clap::Args;
use newsapi::{Client, SearchHeadlines};

use crate::output::{print_articles, OutputFormat};

#[derive(Args, Default)]
pub struct HeadlinesArgs {
    /// Keywords or phrase to search for
    #[arg(long)]
    pub q: String,

    /// Category: business, entertainment, general, health, science, sports, technology
    #[arg(long)]
    pub category: Option<String>,

    /// Two-letter country code (e.g. us, gb). Cannot be combined with --sources
    #[arg(long)]
    pub country: Option<String>,

    /// Comma-separated source identifiers. Cannot be combined with --country
    #[arg(long)]
    pub sources: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

pub fn build_search(args: &HeadlinesArgs) -> Result<SearchHeadlines> {
    let mut builder = SearchHeadlines::builder(args.q.as_str());

    if let Some(ref category) = args.category {
        builder = builder.category(category);
    }
    if let Some(ref country) = args.country {
        builder = builder.country(country);
    }
    if let Some(ref sources) = args.sources {
        builder = builder.sources(sources.as_str());
    }
    if let Some(page) = args.page {
        builder = builder.page(page);
    }
    if let Some(page_size) = args.page_size {
        builder = builder.page_size(page_size);
    }

    Ok(builder.build()?)
}

pub async fn run(args: &HeadlinesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let search = build_search(args)?;
    let resp = client.get_headlines(&search).await?;

    super::report_totals(&resp);
    print_articles(&resp, format)
}

#[cfg(test)]
mod tests {
    use newsapi::Category;

    use super::*;

    #[test]
    fn maps_category_and_country() {
        let args = HeadlinesArgs {
            q: "markets".to_string(),
            category: Some("business".to_string()),
            country: Some("us".to_string()),
            ..Default::default()
        };
        let search = build_search(&args).unwrap();
        assert_eq!(search.category(), Some(Category::Business));
        assert_eq!(search.country().map(|c| c.as_str()), Some("us"));
    }

    #[test]
    fn country_with_sources_is_rejected() {
        let args = HeadlinesArgs {
            q: "markets".to_string(),
            country: Some("us".to_string()),
            sources: Some("bfm".to_string()),
            ..Default::default()
        };
        let err = build_search(&args).unwrap_err();
        assert!(err.to_string().contains("cannot be set together with sources"));
    }
}

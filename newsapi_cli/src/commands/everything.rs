use anyhow::Result;
use clap::Args;
use newsapi::{parse_timestamp, Client, SearchEverything};

use crate::output::{print_articles, OutputFormat};

#[derive(Args, Default)]
pub struct EverythingArgs {
    /// Keywords or phrase to search for
    #[arg(long)]
    pub q: String,

    /// Restrict matching to: title, description, content
    #[arg(long)]
    pub search_in: Option<String>,

    /// Comma-separated source identifiers (e.g. bbc-news,the-verge)
    #[arg(long)]
    pub sources: Option<String>,

    /// Comma-separated domains to include (e.g. bbc.co.uk)
    #[arg(long)]
    pub domains: Option<String>,

    /// Comma-separated domains to exclude
    #[arg(long)]
    pub exclude_domains: Option<String>,

    /// Oldest article date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Newest article date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Two-letter language code (e.g. en, de, fr)
    #[arg(long)]
    pub language: Option<String>,

    /// Sort order: relevancy, popularity, publishedAt
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

pub fn build_search(args: &EverythingArgs) -> Result<SearchEverything> {
    let mut builder = SearchEverything::builder(args.q.as_str());

    if let Some(ref search_in) = args.search_in {
        builder = builder.search_in(search_in);
    }
    if let Some(ref sources) = args.sources {
        builder = builder.sources(sources.as_str());
    }
    if let Some(ref domains) = args.domains {
        builder = builder.domains(domains.as_str());
    }
    if let Some(ref exclude_domains) = args.exclude_domains {
        builder = builder.exclude_domains(exclude_domains.as_str());
    }
    if let Some(ref from) = args.from {
        builder = builder.from_date(parse_timestamp("from_date", from)?);
    }
    if let Some(ref to) = args.to {
        builder = builder.to_date(parse_timestamp("to_date", to)?);
    }
    if let Some(ref language) = args.language {
        builder = builder.language(language);
    }
    if let Some(ref sort_by) = args.sort_by {
        builder = builder.sort_by(sort_by);
    }
    if let Some(page) = args.page {
        builder = builder.page(page);
    }
    if let Some(page_size) = args.page_size {
        builder = builder.page_size(page_size);
    }

    Ok(builder.build()?)
}

pub async fn run(args: &EverythingArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let search = build_search(args)?;
    let resp = client.get_everything(&search).await?;

    super::report_totals(&resp);
    print_articles(&resp, format)
}

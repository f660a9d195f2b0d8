//! CLI subcommand implementations.

pub mod everything;
pub mod headlines;

use newsapi::types::NewsResponse;

/// Summary line written to stderr so stdout carries only the articles.
pub(crate) fn report_totals(resp: &NewsResponse) {
    eprintln!(
        "{} total results ({} shown)",
        resp.total_results,
        resp.articles.len()
    );
}

//! Typed async client for the NewsAPI v2 `everything` and `top-headlines`
//! endpoints.
//!
//! Searches are validated when they are built, so a [`SearchEverything`] or
//! [`SearchHeadlines`] value is always sendable. Every failure after that
//! point (transport, HTTP status, or response shape) surfaces as a
//! [`NewsApiError`].

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use self::errors::NewsApiError;
pub use self::query::{
    format_timestamp, parse_timestamp, semantic_name, wire_name, Alias, Category, Country,
    Language, Query, Search, SearchBuilder, SearchEverything, SearchEverythingBuilder,
    SearchHeadlines, SearchHeadlinesBuilder, SearchIn, SortBy, ValidationError, ValidationRule,
    EVERYTHING_ALIASES, HEADLINES_ALIASES, SEARCH_ALIASES, VALID_COUNTRIES, VALID_LANGUAGES,
};

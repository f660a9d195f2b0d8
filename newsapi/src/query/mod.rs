mod codes;
pub use self::codes::{Country, Language, VALID_COUNTRIES, VALID_LANGUAGES};

mod common;
pub use self::common::{
    format_timestamp, parse_timestamp, semantic_name, wire_name, Alias, Query, Search,
    SearchBuilder, SEARCH_ALIASES,
};

mod everything;
pub use self::everything::{
    SearchEverything, SearchEverythingBuilder, SearchIn, SortBy, EVERYTHING_ALIASES,
};

mod headlines;
pub use self::headlines::{Category, SearchHeadlines, SearchHeadlinesBuilder, HEADLINES_ALIASES};

mod validation;
pub use self::validation::{ValidationError, ValidationRule};

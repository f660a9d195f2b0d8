use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};

use super::{
    codes::Language,
    common::{
        format_timestamp, json_pairs, parse_timestamp, semantic_name, Alias, Search, SearchBuilder,
    },
    validation::{check_one_of, ValidationError},
    Query,
};

/// Wire aliases for `/v2/everything`, in emission order.
pub const EVERYTHING_ALIASES: &[Alias] = &[
    ("q", "q"),
    ("search_in", "searchIn"),
    ("sources", "sources"),
    ("domains", "domains"),
    ("exclude_domains", "excludeDomains"),
    ("from_date", "from"),
    ("to_date", "to"),
    ("language", "language"),
    ("sort_by", "sortBy"),
    ("page_size", "pageSize"),
    ("page", "page"),
];

/// Article fields the query string is matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchIn {
    Title,
    Description,
    Content,
}

impl SearchIn {
    pub const VALUES: &'static [&'static str] = &["title", "description", "content"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchIn::Title => "title",
            SearchIn::Description => "description",
            SearchIn::Content => "content",
        }
    }
}

impl AsRef<str> for SearchIn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SearchIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchIn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match check_one_of("search_in", s, Self::VALUES)? {
            "title" => Ok(SearchIn::Title),
            "description" => Ok(SearchIn::Description),
            _ => Ok(SearchIn::Content),
        }
    }
}

/// Result ordering for `/v2/everything`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortBy {
    pub const VALUES: &'static [&'static str] = &["relevancy", "popularity", "publishedAt"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

impl AsRef<str> for SortBy {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match check_one_of("sort_by", s, Self::VALUES)? {
            "relevancy" => Ok(SortBy::Relevancy),
            "popularity" => Ok(SortBy::Popularity),
            _ => Ok(SortBy::PublishedAt),
        }
    }
}

/// Validated parameters for the `/v2/everything` endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchEverything {
    common: Search,
    search_in: Option<SearchIn>,
    domains: Option<String>,
    exclude_domains: Option<String>,
    from_date: Option<DateTime<Utc>>,
    to_date: Option<DateTime<Utc>>,
    language: Option<Language>,
    sort_by: Option<SortBy>,
}

impl SearchEverything {
    pub fn builder(q: impl Into<String>) -> SearchEverythingBuilder {
        SearchEverythingBuilder::new(q)
    }

    /// Rebuilds a search from wire parameters, running full validation.
    pub fn from_query_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self, ValidationError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_wire(
            pairs
                .iter()
                .map(|(wire, value)| (wire.as_ref(), Some(value.as_ref()))),
        )
    }

    /// Rebuilds a search from a JSON object keyed by wire names. A `null`
    /// enumerated field is rejected like any other out-of-set value.
    pub fn from_json_value(
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ValidationError> {
        let pairs = json_pairs(object);
        Self::from_wire(
            pairs
                .iter()
                .map(|(wire, value)| (wire.as_str(), value.as_deref())),
        )
    }

    fn from_wire<'a>(
        pairs: impl Iterator<Item = (&'a str, Option<&'a str>)>,
    ) -> Result<Self, ValidationError> {
        let mut builder = SearchEverythingBuilder::new("");
        for (wire, value) in pairs {
            let field = semantic_name(EVERYTHING_ALIASES, wire)?;
            match value {
                Some(value) => builder.set_raw(field, value)?,
                None => builder.set_null(field),
            }
        }
        builder.build()
    }

    pub fn search_in(&self) -> Option<SearchIn> {
        self.search_in
    }

    pub fn domains(&self) -> Option<&str> {
        self.domains.as_deref()
    }

    pub fn exclude_domains(&self) -> Option<&str> {
        self.exclude_domains.as_deref()
    }

    pub fn from_date(&self) -> Option<DateTime<Utc>> {
        self.from_date
    }

    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        self.to_date
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn sort_by(&self) -> Option<SortBy> {
        self.sort_by
    }
}

impl Query for SearchEverything {
    fn aliases(&self) -> &'static [Alias] {
        EVERYTHING_ALIASES
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "search_in" => self.search_in.map(|v| v.to_string()),
            "domains" => self.domains.clone(),
            "exclude_domains" => self.exclude_domains.clone(),
            "from_date" => self.from_date.as_ref().map(format_timestamp),
            "to_date" => self.to_date.as_ref().map(format_timestamp),
            "language" => self.language.map(|v| v.to_string()),
            "sort_by" => self.sort_by.map(|v| v.to_string()),
            _ => self.common.field_value(field),
        }
    }

    fn common(&self) -> &Search {
        &self.common
    }
}

/// Collects raw `/v2/everything` parameters; [`build`](Self::build) validates them.
#[derive(Clone, Debug, Default)]
pub struct SearchEverythingBuilder {
    common: SearchBuilder,
    search_in: Option<String>,
    domains: Option<String>,
    exclude_domains: Option<String>,
    from_date: Option<DateTime<Utc>>,
    to_date: Option<DateTime<Utc>>,
    language: Option<String>,
    sort_by: Option<String>,
}

impl SearchEverythingBuilder {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            common: SearchBuilder::new(q),
            ..Default::default()
        }
    }

    pub fn sources(mut self, sources: impl Into<String>) -> Self {
        self.common = self.common.sources(sources);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.common = self.common.page(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.common = self.common.page_size(page_size);
        self
    }

    /// One of `title`, `description`, `content`.
    pub fn search_in(mut self, search_in: impl AsRef<str>) -> Self {
        self.search_in = Some(search_in.as_ref().to_string());
        self
    }

    pub fn domains(mut self, domains: impl Into<String>) -> Self {
        self.domains = Some(domains.into());
        self
    }

    pub fn exclude_domains(mut self, exclude_domains: impl Into<String>) -> Self {
        self.exclude_domains = Some(exclude_domains.into());
        self
    }

    /// Oldest article timestamp. Sub-second precision is dropped, since the
    /// wire format carries whole seconds.
    pub fn from_date(mut self, from_date: DateTime<Utc>) -> Self {
        self.from_date = Some(from_date);
        self
    }

    /// Newest article timestamp, truncated to whole seconds like
    /// [`from_date`](Self::from_date).
    pub fn to_date(mut self, to_date: DateTime<Utc>) -> Self {
        self.to_date = Some(to_date);
        self
    }

    /// An entry of [`VALID_LANGUAGES`](super::codes::VALID_LANGUAGES).
    pub fn language(mut self, language: impl AsRef<str>) -> Self {
        self.language = Some(language.as_ref().to_string());
        self
    }

    /// One of `relevancy`, `popularity`, `publishedAt`.
    pub fn sort_by(mut self, sort_by: impl AsRef<str>) -> Self {
        self.sort_by = Some(sort_by.as_ref().to_string());
        self
    }

    fn set_raw(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        if self.common.set_raw(field, value)? {
            return Ok(());
        }
        match field {
            "search_in" => self.search_in = Some(value.to_string()),
            "domains" => self.domains = Some(value.to_string()),
            "exclude_domains" => self.exclude_domains = Some(value.to_string()),
            "from_date" => self.from_date = Some(parse_timestamp(field, value)?),
            "to_date" => self.to_date = Some(parse_timestamp(field, value)?),
            "language" => self.language = Some(value.to_string()),
            "sort_by" => self.sort_by = Some(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    fn set_null(&mut self, field: &str) {
        match field {
            "search_in" => self.search_in = Some(String::new()),
            "language" => self.language = Some(String::new()),
            "sort_by" => self.sort_by = Some(String::new()),
            _ => {}
        }
    }

    pub fn build(self) -> Result<SearchEverything, ValidationError> {
        let common = self.common.build()?;
        Ok(SearchEverything {
            common,
            search_in: self.search_in.as_deref().map(str::parse::<SearchIn>).transpose()?,
            domains: self.domains,
            exclude_domains: self.exclude_domains,
            from_date: self.from_date.map(|ts| ts.trunc_subsecs(0)),
            to_date: self.to_date.map(|ts| ts.trunc_subsecs(0)),
            language: self.language.as_deref().map(str::parse::<Language>).transpose()?,
            sort_by: self.sort_by.as_deref().map(str::parse::<SortBy>).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use url::Url;

    use super::*;
    use crate::query::validation::ValidationRule;

    #[test]
    fn test_everything_query() {
        let url = Url::parse("https://example.com/v2/everything").unwrap();
        let search = SearchEverything::builder("bitcoin")
            .search_in("title")
            .sources("bbc-news")
            .domains("bbc.co.uk")
            .exclude_domains("example.com")
            .from_date(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap())
            .to_date(Utc.with_ymd_and_hms(2023, 6, 9, 17, 28, 51).unwrap())
            .language("en")
            .sort_by("publishedAt")
            .page_size(100)
            .page(2)
            .build()
            .unwrap();

        insta::assert_snapshot!(
            search.add_to_url(&url).to_string(),
            @"https://example.com/v2/everything?q=bitcoin&searchIn=title&sources=bbc-news&domains=bbc.co.uk&excludeDomains=example.com&from=2023-06-01T00%3A00%3A00Z&to=2023-06-09T17%3A28%3A51Z&language=en&sortBy=publishedAt&pageSize=100&page=2"
        );
    }

    #[test]
    fn minimal_query_only_sends_q() {
        let search = SearchEverything::builder("rust").build().unwrap();
        assert_eq!(search.to_query_pairs(), vec![("q", "rust".to_string())]);
    }

    #[test]
    fn invalid_search_in_names_allowed_values() {
        let err = SearchEverything::builder("rust")
            .search_in("hello")
            .build()
            .unwrap_err();
        assert_eq!(err.field, "search_in");
        assert_eq!(
            err.to_string(),
            "search_in must be one of title, description, content"
        );
    }

    #[test]
    fn invalid_sort_by_is_rejected() {
        let err = SearchEverything::builder("rust")
            .sort_by("hello")
            .build()
            .unwrap_err();
        assert_eq!(err.field, "sort_by");
        assert_eq!(err.rule, ValidationRule::OneOf(SortBy::VALUES));
    }

    #[test]
    fn empty_enumerated_value_is_rejected() {
        let err = SearchEverything::builder("rust")
            .language("")
            .build()
            .unwrap_err();
        assert_eq!(err.field, "language");
    }

    #[test]
    fn typed_values_feed_the_builder() {
        let search = SearchEverything::builder("rust")
            .search_in(SearchIn::Content)
            .sort_by(SortBy::Popularity)
            .build()
            .unwrap();
        assert_eq!(search.search_in(), Some(SearchIn::Content));
        assert_eq!(search.sort_by(), Some(SortBy::Popularity));
        assert_eq!(search.common().q(), "rust");
    }

    #[test]
    fn sub_second_dates_survive_a_wire_round_trip() {
        let ts = Utc.with_ymd_and_hms(2023, 6, 9, 17, 28, 51).unwrap()
            + chrono::Duration::milliseconds(750);
        let search = SearchEverything::builder("rust")
            .from_date(ts)
            .to_date(ts)
            .build()
            .unwrap();
        assert_eq!(
            search.from_date(),
            Some(Utc.with_ymd_and_hms(2023, 6, 9, 17, 28, 51).unwrap())
        );

        let rebuilt = SearchEverything::from_query_pairs(&search.to_query_pairs()).unwrap();
        assert_eq!(rebuilt, search);
    }
}

use std::str::FromStr;

use super::{
    codes::Country,
    common::{json_pairs, semantic_name, Alias, Search, SearchBuilder},
    validation::{check_one_of, ValidationError, ValidationRule},
    Query,
};

/// Wire aliases for `/v2/top-headlines`, in emission order.
pub const HEADLINES_ALIASES: &[Alias] = &[
    ("q", "q"),
    ("category", "category"),
    ("country", "country"),
    ("sources", "sources"),
    ("page_size", "pageSize"),
    ("page", "page"),
];

/// Headline categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const VALUES: &'static [&'static str] = &[
        "business",
        "entertainment",
        "general",
        "health",
        "science",
        "sports",
        "technology",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match check_one_of("category", s, Self::VALUES)? {
            "business" => Ok(Category::Business),
            "entertainment" => Ok(Category::Entertainment),
            "general" => Ok(Category::General),
            "health" => Ok(Category::Health),
            "science" => Ok(Category::Science),
            "sports" => Ok(Category::Sports),
            _ => Ok(Category::Technology),
        }
    }
}

/// Validated parameters for the `/v2/top-headlines` endpoint.
///
/// `sources` and `country` never coexist on a built value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHeadlines {
    common: Search,
    category: Option<Category>,
    country: Option<Country>,
}

impl SearchHeadlines {
    pub fn builder(q: impl Into<String>) -> SearchHeadlinesBuilder {
        SearchHeadlinesBuilder::new(q)
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

    /// Rebuilds a search from a JSON object keyed by wire names.
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
        let mut builder = SearchHeadlinesBuilder::new("");
        for (wire, value) in pairs {
            let field = semantic_name(HEADLINES_ALIASES, wire)?;
            match value {
                Some(value) => builder.set_raw(field, value)?,
                None => builder.set_null(field),
            }
        }
        builder.build()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn country(&self) -> Option<Country> {
        self.country
    }
}

impl Query for SearchHeadlines {
    fn aliases(&self) -> &'static [Alias] {
        HEADLINES_ALIASES
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "category" => self.category.map(|v| v.to_string()),
            "country" => self.country.map(|v| v.to_string()),
            _ => self.common.field_value(field),
        }
    }

    fn common(&self) -> &Search {
        &self.common
    }
}

/// Collects raw `/v2/top-headlines` parameters; [`build`](Self::build) validates them.
#[derive(Clone, Debug, Default)]
pub struct SearchHeadlinesBuilder {
    common: SearchBuilder,
    category: Option<String>,
    country: Option<String>,
}

impl SearchHeadlinesBuilder {
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

    /// One of the [`Category::VALUES`].
    pub fn category(mut self, category: impl AsRef<str>) -> Self {
        self.category = Some(category.as_ref().to_string());
        self
    }

    /// An entry of [`VALID_COUNTRIES`](super::codes::VALID_COUNTRIES).
    pub fn country(mut self, country: impl AsRef<str>) -> Self {
        self.country = Some(country.as_ref().to_string());
        self
    }

    fn set_raw(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        if self.common.set_raw(field, value)? {
            return Ok(());
        }
        match field {
            "category" => self.category = Some(value.to_string()),
            "country" => self.country = Some(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    fn set_null(&mut self, field: &str) {
        match field {
            "category" => self.category = Some(String::new()),
            "country" => self.country = Some(String::new()),
            _ => {}
        }
    }

    pub fn build(self) -> Result<SearchHeadlines, ValidationError> {
        let common = self.common.build()?;
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?;
        let country = self
            .country
            .as_deref()
            .map(str::parse::<Country>)
            .transpose()?;

        // Checked only once every field is individually valid.
        if common.sources().is_some() && country.is_some() {
            return Err(ValidationError::new(
                "country",
                ValidationRule::MutuallyExclusive("sources"),
            ));
        }

        Ok(SearchHeadlines {
            common,
            category,
            country,
        })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_headlines_query() {
        let url = Url::parse("https://example.com/v2/top-headlines").unwrap();
        let search = SearchHeadlines::builder("election")
            .category(Category::General)
            .country("us")
            .page_size(20)
            .page(1)
            .build()
            .unwrap();

        insta::assert_snapshot!(
            search.add_to_url(&url).to_string(),
            @"https://example.com/v2/top-headlines?q=election&category=general&country=us&pageSize=20&page=1"
        );
    }

    #[test]
    fn country_alone_is_accepted() {
        let search = SearchHeadlines::builder("election")
            .country("us")
            .build()
            .unwrap();
        assert_eq!(search.country().map(|c| c.as_str()), Some("us"));
        assert!(search.common().sources().is_none());
    }

    #[test]
    fn sources_alone_is_accepted() {
        let search = SearchHeadlines::builder("election")
            .sources("bfm")
            .build()
            .unwrap();
        assert_eq!(
            search.to_query_pairs(),
            vec![("q", "election".to_string()), ("sources", "bfm".to_string())]
        );
    }

    #[test]
    fn sources_and_country_are_mutually_exclusive() {
        let err = SearchHeadlines::builder("election")
            .country("us")
            .sources("bfm")
            .build()
            .unwrap_err();
        assert_eq!(err.field, "country");
        assert_eq!(err.rule, ValidationRule::MutuallyExclusive("sources"));
    }

    #[test]
    fn invalid_country_reported_before_exclusion() {
        let err = SearchHeadlines::builder("election")
            .country("zz")
            .sources("bfm")
            .build()
            .unwrap_err();
        assert!(matches!(err.rule, ValidationRule::OneOf(_)));
    }

    #[test]
    fn invalid_category_is_rejected() {
        let err = SearchHeadlines::builder("election")
            .category("politics")
            .build()
            .unwrap_err();
        assert_eq!(err.field, "category");
        assert_eq!(
            err.to_string(),
            "category must be one of business, entertainment, general, health, science, sports, technology"
        );
    }
}

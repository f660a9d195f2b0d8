//! Shared query infrastructure: the [`Query`] trait, the [`Search`] base fields,
//! and the alias-table plumbing used to encode and decode wire parameters.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use url::Url;

use super::validation::{ValidationError, ValidationRule};

/// A `(semantic name, wire name)` pair. Each search model owns one table and
/// uses it for both directions.
pub type Alias = (&'static str, &'static str);

/// Aliases for the fields every search shares.
pub const SEARCH_ALIASES: &[Alias] = &[
    ("q", "q"),
    ("sources", "sources"),
    ("page", "page"),
    ("page_size", "pageSize"),
];

/// Trait implemented by all search models. Provides wire serialization driven
/// by the model's alias table.
pub trait Query {
    /// The model's alias table, in the order parameters are emitted.
    fn aliases(&self) -> &'static [Alias];

    /// Current value of a field addressed by its semantic name, rendered as it
    /// is sent on the wire. `None` for unset fields.
    fn field_value(&self, field: &str) -> Option<String>;

    /// Returns the shared base fields.
    fn common(&self) -> &Search;

    /// Set fields keyed by wire name. Unset fields are omitted entirely.
    fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.aliases()
            .iter()
            .filter_map(|(semantic, wire)| self.field_value(semantic).map(|v| (*wire, v)))
            .collect()
    }

    /// Set fields keyed by semantic name, for application code and logging.
    fn to_semantic_pairs(&self) -> Vec<(&'static str, String)> {
        self.aliases()
            .iter()
            .filter_map(|(semantic, _)| self.field_value(semantic).map(|v| (*semantic, v)))
            .collect()
    }

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let pairs = self.to_query_pairs();
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (name, value) in pairs.iter() {
                serializer.append_pair(name, value);
            }
        }
        url
    }
}

/// Maps a wire parameter name back to its semantic name.
pub fn semantic_name(
    aliases: &'static [Alias],
    wire: &str,
) -> Result<&'static str, ValidationError> {
    aliases
        .iter()
        .find(|(_, w)| *w == wire)
        .map(|(semantic, _)| *semantic)
        .ok_or_else(|| ValidationError::new(wire, ValidationRule::UnknownParameter))
}

/// Maps a semantic field name to its wire parameter name.
pub fn wire_name(aliases: &'static [Alias], semantic: &str) -> Option<&'static str> {
    aliases
        .iter()
        .find(|(s, _)| *s == semantic)
        .map(|(_, wire)| *wire)
}

/// Flattens a JSON object into wire pairs. `null` becomes `None`; scalars are
/// rendered without quotes.
pub fn json_pairs(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Vec<(String, Option<String>)> {
    object
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            };
            (key.clone(), rendered)
        })
        .collect()
}

/// Fields shared by all searches: the query string, sources, and paging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search {
    q: String,
    sources: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl Search {
    /// Builds a search with only the required query string.
    pub fn new(q: impl Into<String>) -> Result<Self, ValidationError> {
        SearchBuilder::new(q).build()
    }

    pub fn builder(q: impl Into<String>) -> SearchBuilder {
        SearchBuilder::new(q)
    }

    /// Free-text query.
    pub fn q(&self) -> &str {
        &self.q
    }

    /// Comma-separated source identifiers, passed through untouched.
    pub fn sources(&self) -> Option<&str> {
        self.sources.as_deref()
    }

    /// Page number (1-indexed).
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Results per page.
    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }
}

impl Query for Search {
    fn aliases(&self) -> &'static [Alias] {
        SEARCH_ALIASES
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "q" => Some(self.q.clone()),
            "sources" => self.sources.clone(),
            "page" => self.page.map(|p| p.to_string()),
            "page_size" => self.page_size.map(|p| p.to_string()),
            _ => None,
        }
    }

    fn common(&self) -> &Search {
        self
    }
}

/// Unvalidated base fields. [`SearchBuilder::build`] is the only way to get a
/// [`Search`].
#[derive(Clone, Debug, Default)]
pub struct SearchBuilder {
    q: String,
    sources: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl SearchBuilder {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn sources(mut self, sources: impl Into<String>) -> Self {
        self.sources = Some(sources.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets a base field from its wire representation. Returns `Ok(false)` if
    /// the field is not a base field.
    pub(crate) fn set_raw(&mut self, field: &str, value: &str) -> Result<bool, ValidationError> {
        match field {
            "q" => self.q = value.to_string(),
            "sources" => self.sources = Some(value.to_string()),
            "page" => self.page = Some(parse_positive("page", value)?),
            "page_size" => self.page_size = Some(parse_positive("page_size", value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn build(self) -> Result<Search, ValidationError> {
        if self.q.trim().is_empty() {
            return Err(ValidationError::new("q", ValidationRule::Empty));
        }
        if self.page == Some(0) {
            return Err(ValidationError::new("page", ValidationRule::NotPositive));
        }
        if self.page_size == Some(0) {
            return Err(ValidationError::new("page_size", ValidationRule::NotPositive));
        }
        Ok(Search {
            q: self.q,
            sources: self.sources,
            page: self.page,
            page_size: self.page_size,
        })
    }
}

fn parse_positive(field: &str, value: &str) -> Result<u32, ValidationError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::new(field, ValidationRule::NotPositive)),
    }
}

/// Renders a timestamp the way the API expects it (`2023-06-09T17:28:51Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses a wire timestamp. Accepts RFC 3339 or a bare `YYYY-MM-DD` date,
/// which is taken as midnight UTC.
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ValidationError::new(field, ValidationRule::InvalidTimestamp))
}

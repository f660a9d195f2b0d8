//! Article types returned inside every news response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The publication an article came from. Both fields may be null on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Source {
    /// Source identifier usable in the `sources` parameter, when the API knows one.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name of the publication.
    #[serde(default)]
    pub name: Option<String>,
}

/// A single news item.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Article {
    pub source: Source,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(rename = "urlToImage", default)]
    pub url_to_image: Option<String>,

    /// Publication time. Required; an unparseable value fails the whole response.
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,

    /// Truncated article body as provided by the API.
    #[serde(default)]
    pub content: Option<String>,
}

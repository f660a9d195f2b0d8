use serde::{Deserialize, Serialize};

use super::Article;

/// The body did not have the shape of a [`NewsResponse`].
#[derive(thiserror::Error, Debug)]
#[error("Failed to parse news response: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Top-level result of both endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewsResponse {
    pub status: String,

    #[serde(rename = "totalResults")]
    pub total_results: i64,

    /// Articles in the order the API returned them.
    pub articles: Vec<Article>,
}

impl NewsResponse {
    /// Builds a response from an already decoded JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParseError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Builds a response from raw JSON text.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Whether the API reported `"status": "ok"`.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_article_list_is_valid() {
        let resp = NewsResponse::from_value(json!({
            "status": "ok",
            "totalResults": 0,
            "articles": []
        }))
        .unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.total_results, 0);
        assert!(resp.articles.is_empty());
    }

    #[test]
    fn missing_total_results_is_a_parse_error() {
        let err = NewsResponse::from_value(json!({"status": "ok", "articles": []})).unwrap_err();
        assert!(err.to_string().contains("totalResults"));
    }

    #[test]
    fn non_json_text_is_a_parse_error() {
        assert!(NewsResponse::from_json("{not valid json}").is_err());
    }
}

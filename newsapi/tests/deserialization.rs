use chrono::{TimeZone, Utc};
use newsapi::types::{Article, NewsResponse};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_everything_full() {
    let json = load_fixture("everything.json");
    let resp = NewsResponse::from_json(&json).unwrap();
    assert_eq!(resp.status, "ok");
    assert!(resp.is_ok());
    assert_eq!(resp.total_results, 11959);
    assert_eq!(resp.articles.len(), 100);

    let first = &resp.articles[0];
    assert_eq!(first.source.id.as_deref(), Some("the-verge"));
    assert_eq!(first.source.name.as_deref(), Some("The Verge"));
    assert_eq!(first.title.as_deref(), Some("Bitcoin market update #1"));
    assert_eq!(
        first.url_to_image.as_deref(),
        Some("https://news.example.com/images/1.jpg")
    );
    assert_eq!(
        first.published_at,
        Utc.with_ymd_and_hms(2023, 6, 9, 17, 28, 51).unwrap()
    );
}

#[test]
fn deserialize_preserves_article_order() {
    let json = load_fixture("everything.json");
    let resp = NewsResponse::from_json(&json).unwrap();
    for (i, article) in resp.articles.iter().enumerate() {
        assert_eq!(
            article.url.as_deref(),
            Some(format!("https://news.example.com/articles/{}", i + 1).as_str())
        );
    }
}

#[test]
fn deserialize_headlines_with_nulls() {
    let json = load_fixture("headlines.json");
    let resp = NewsResponse::from_json(&json).unwrap();
    assert_eq!(resp.total_results, 2);

    let cnbc = &resp.articles[1];
    assert!(cnbc.source.id.is_none());
    assert_eq!(cnbc.source.name.as_deref(), Some("CNBC"));
    assert!(cnbc.author.is_none());
    assert!(cnbc.url_to_image.is_none());
    assert!(cnbc.content.is_none());
}

#[test]
fn from_value_matches_from_json() {
    let json = load_fixture("headlines.json");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        NewsResponse::from_value(value).unwrap(),
        NewsResponse::from_json(&json).unwrap()
    );
}

#[test]
fn reserialize_keeps_wire_names() {
    let json = load_fixture("headlines.json");
    let resp = NewsResponse::from_json(&json).unwrap();
    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["totalResults"], 2);
    assert_eq!(value["articles"][0]["urlToImage"], "https://apnews.com/img/1.jpg");
    assert_eq!(value["articles"][0]["publishedAt"], "2023-06-09T13:00:00Z");
    assert_eq!(NewsResponse::from_value(value).unwrap(), resp);
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = load_fixture("invalid_shape.json");
    assert!(NewsResponse::from_json(&json).is_err());
}

#[test]
fn deserialize_error_body_returns_error() {
    let json = load_fixture("error.json");
    assert!(NewsResponse::from_json(&json).is_err());
}

#[test]
fn article_requires_published_at() {
    let value = serde_json::json!({"source": {"id": null, "name": null}});
    assert!(serde_json::from_value::<Article>(value).is_err());
}

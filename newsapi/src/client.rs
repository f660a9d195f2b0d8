//! HTTP client for the NewsAPI v2 endpoints.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use url::Url;

use crate::{
    query::{Query, SearchEverything, SearchHeadlines},
    types::NewsResponse,
    NewsApiError,
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

const EVERYTHING_PATH: &str = "/v2/everything";
const HEADLINES_PATH: &str = "/v2/top-headlines";

/// Transport settings. The client imposes no timeout of its own; leaving
/// `timeout` unset defers to reqwest's defaults.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scheme and host the endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout handed to the HTTP session.
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: concat!("newsapi-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

enum Session {
    Idle,
    Open(reqwest::Client),
    Closed,
}

struct Inner {
    api_key: String,
    config: ClientConfig,
    session: Mutex<Session>,
}

impl Inner {
    /// Returns the shared session, creating it on first use. The lock is
    /// released before the caller awaits anything.
    fn session(&self) -> Result<reqwest::Client, NewsApiError> {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        match &*session {
            Session::Open(client) => Ok(client.clone()),
            Session::Closed => Err(NewsApiError::Closed),
            Session::Idle => {
                let mut builder = reqwest::Client::builder().user_agent(&self.config.user_agent);
                if let Some(timeout) = self.config.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().map_err(|e| {
                    tracing::error!("Failed to build HTTP client: {}", e);
                    NewsApiError::Transport(e)
                })?;
                tracing::debug!("Opened HTTP session for {}", self.config.base_url);
                *session = Session::Open(client.clone());
                Ok(client)
            }
        }
    }

    fn close(&self) -> bool {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        match std::mem::replace(&mut *session, Session::Closed) {
            Session::Closed => false,
            Session::Open(_) => {
                tracing::debug!("Released HTTP session");
                true
            }
            Session::Idle => true,
        }
    }

    fn is_closed(&self) -> bool {
        matches!(
            *self.session.lock().unwrap_or_else(|e| e.into_inner()),
            Session::Closed
        )
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.close();
    }
}

/// HTTP client for the NewsAPI v2 endpoints.
///
/// Cloning is cheap: every clone shares the API key and one lazily created
/// HTTP session, so concurrent calls reuse pooled connections. The session is
/// released by [`close`](Self::close), at the end of [`scope`](Self::scope), or
/// when the last clone is dropped. Calls made after release fail with
/// [`NewsApiError::Closed`].
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.config.base_url)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self::with_config(
            api_key,
            ClientConfig {
                base_url: base_url.to_string(),
                ..ClientConfig::default()
            },
        )
    }

    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api_key: api_key.into(),
                config,
                session: Mutex::new(Session::Idle),
            }),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Creates the HTTP session now rather than on the first call.
    pub fn open(&self) -> Result<(), NewsApiError> {
        self.inner.session().map(|_| ())
    }

    /// Releases the HTTP session. Returns `true` only for the call that
    /// actually closed the client; later calls are no-ops.
    pub fn close(&self) -> bool {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Runs `f` with an open client and releases the session afterwards on
    /// every exit path: success, error, panic, or the future being dropped.
    /// Whatever `f` returns, including its error, is passed through unchanged.
    pub async fn scope<T, E, F, Fut>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<NewsApiError>,
    {
        let _release = ReleaseOnDrop(&self);
        self.open()?;
        f(self.clone()).await
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, NewsApiError> {
        let base = self.inner.config.base_url.trim_end_matches('/');
        Url::parse(format!("{}{}", base, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            NewsApiError::InvalidUrl(e)
        })
    }

    /// Sends an authenticated GET and decodes the JSON body. Any non-success
    /// status, transport failure, or non-JSON body is returned as a
    /// [`NewsApiError`]; no retry is attempted.
    pub async fn call(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, NewsApiError> {
        let session = self.inner.session()?;
        tracing::debug!("GET {} with {} parameters", url, params.len());

        let resp = session
            .get(url)
            .bearer_auth(&self.inner.api_key)
            .header("accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                NewsApiError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let source = resp.error_for_status_ref().err();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(NewsApiError::HttpStatus {
                status: status.as_u16(),
                body: snippet,
                source,
            });
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            NewsApiError::Transport(e)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to decode body: {} | body: {}", e, truncate_body(&body));
            NewsApiError::Parse(e.into())
        })
    }

    async fn get<Q: Query>(&self, path: &str, search: &Q) -> Result<NewsResponse, NewsApiError> {
        let url = self.endpoint_url(path)?;
        let params = search.to_query_pairs();
        let value = self.call(url.as_str(), &params).await?;
        NewsResponse::from_value(value).map_err(|e| {
            tracing::error!("Failed to parse resource: {}", e);
            NewsApiError::Parse(e)
        })
    }

    /// Searches every indexed article.
    pub async fn get_everything(
        &self,
        search: &SearchEverything,
    ) -> Result<NewsResponse, NewsApiError> {
        self.get(EVERYTHING_PATH, search).await
    }

    /// Fetches top headlines.
    pub async fn get_headlines(
        &self,
        search: &SearchHeadlines,
    ) -> Result<NewsResponse, NewsApiError> {
        self.get(HEADLINES_PATH, search).await
    }
}

struct ReleaseOnDrop<'a>(&'a Client);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.close();
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

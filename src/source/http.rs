//! HTTP implementation of [`DataSource`] for the posts API.
//!
//! Builds each request with [`ApiRoute`], sends it with a blocking
//! [`reqwest`] client, and decodes the JSON array body into [`Article`]s.

use std::time::Duration;

use tracing::debug;
use url::Url;

use super::request::{Method, RequestDescriptor};
use super::{ApiRoute, Article, DataSource, FetchError};

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Fetches article pages from `{base_url}/posts?page=N`.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: Url,
    label: String,
}

impl HttpSource {
    /// Create a source for the API rooted at `base_url`.
    ///
    /// Must be called outside of an async context: the blocking client owns
    /// its own internal runtime.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let label = base_url.host_str().unwrap_or("api").to_string();
        Ok(Self {
            client,
            base_url,
            label,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Decode a response body into articles.
    ///
    /// Pure function (no I/O) so tests can exercise decoding without the
    /// network.
    pub fn parse_articles(body: &[u8]) -> Result<Vec<Article>, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }

    fn send(&self, request: RequestDescriptor) -> Result<Vec<u8>, FetchError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let mut builder = self.client.request(request.method.into(), request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

impl DataSource for HttpSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self, page: u32) -> Result<Vec<Article>, FetchError> {
        let request = ApiRoute::GetNews { page }.build(&self.base_url)?;
        let body = self.send(request)?;
        let articles = Self::parse_articles(&body)?;
        debug!(page, count = articles.len(), "decoded page");
        Ok(articles)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::request::parse_base_url;

    #[test]
    fn parse_articles_decodes_array() {
        let body = br#"[
            {"id": "1", "title": "One", "publishedAt": "2024-01-01T00:00:00Z"},
            {"id": 2, "title": "Two", "publishedAt": "2024-01-02T00:00:00Z"}
        ]"#;

        let articles = HttpSource::parse_articles(body).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "1");
        assert_eq!(articles[1].id, "2");
        assert_eq!(articles[1].title, "Two");
    }

    #[test]
    fn parse_articles_accepts_empty_page() {
        let articles = HttpSource::parse_articles(b"[]").unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn parse_articles_rejects_non_array() {
        let err = HttpSource::parse_articles(br#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.is_construction());
    }

    #[test]
    fn page_zero_fails_before_any_network_call() {
        let src = HttpSource::new(
            parse_base_url("http://127.0.0.1:9/").unwrap(),
            Duration::from_millis(50),
        )
        .unwrap();

        let err = src.fetch(0).unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn name_is_host() {
        let src = HttpSource::new(
            parse_base_url("https://news.example.com/api").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(src.name(), "news.example.com");
        assert_eq!(src.base_url().as_str(), "https://news.example.com/api");
    }

    #[test]
    fn method_maps_to_reqwest() {
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
    }
}

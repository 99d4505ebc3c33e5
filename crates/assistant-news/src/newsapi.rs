//! NewsAPI headline client.

use std::time::Duration;

use assistant_core::error::NewsError;
use assistant_core::traits::NewsSource;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::cache::NewsCache;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

/// Endpoint settings for [`NewsApiClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsApiConfig {
    pub base_url: String,
    /// Maximum headlines kept per symbol
    pub page_size: usize,
    pub timeout_secs: u64,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            page_size: 5,
            timeout_secs: 10,
        }
    }
}

/// Fetches recent English headlines mentioning a symbol.
///
/// Degrades to an empty list on a missing API key or any request failure.
pub struct NewsApiClient {
    config: NewsApiConfig,
    api_key: Option<String>,
    client: reqwest::Client,
    cache: NewsCache,
}

impl NewsApiClient {
    pub fn new(
        config: NewsApiConfig,
        api_key: Option<String>,
        cache: NewsCache,
    ) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NewsError::Connection(e.to_string()))?;

        Ok(Self {
            config,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
            cache,
        })
    }

    async fn request(&self, symbol: &str, api_key: &str) -> Result<Vec<String>, NewsError> {
        let url = format!("{}/v2/everything", self.config.base_url.trim_end_matches('/'));
        let page_size = self.config.page_size.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", symbol),
                ("apiKey", api_key),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
            ])
            .send()
            .await
            .map_err(|e| NewsError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| NewsError::Connection(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| NewsError::Connection(e.to_string()))?;

        parse_headlines(&body, self.config.page_size)
    }
}

/// First `limit` non-empty article titles from an `everything` response.
pub(crate) fn parse_headlines(body: &str, limit: usize) -> Result<Vec<String>, NewsError> {
    let response: EverythingResponse =
        serde_json::from_str(body).map_err(|e| NewsError::Parse(e.to_string()))?;

    Ok(response
        .articles
        .into_iter()
        .filter_map(|a| a.title)
        .filter(|t| !t.trim().is_empty())
        .take(limit)
        .collect())
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_headlines(&self, symbol: &str) -> Vec<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!(symbol, "News API key not set, skipping news fetch");
            return Vec::new();
        };

        let now = Utc::now();
        if let Some(headlines) = self.cache.get_fresh(symbol, now) {
            info!(symbol, count = headlines.len(), "Reusing cached news");
            return headlines;
        }

        match self.request(symbol, api_key).await {
            Ok(headlines) => {
                info!(symbol, count = headlines.len(), "Fetched fresh news");
                self.cache.insert(symbol, headlines.clone(), now);
                headlines
            }
            Err(e) => {
                error!(symbol, error = %e, "Failed to fetch news");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>, cache: NewsCache) -> NewsApiClient {
        NewsApiClient::new(
            NewsApiConfig {
                // nothing listens here; any request fails fast
                base_url: "http://127.0.0.1:9".into(),
                timeout_secs: 1,
                ..Default::default()
            },
            api_key.map(String::from),
            cache,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_headlines() {
        let body = r#"{
            "status": "ok",
            "totalResults": 7,
            "articles": [
                {"title": "Infosys beats estimates"},
                {"title": null},
                {"title": ""},
                {"title": "Infosys shares rally"},
                {"title": "Third"},
                {"title": "Fourth"}
            ]
        }"#;

        let headlines = parse_headlines(body, 3).unwrap();
        assert_eq!(headlines, vec!["Infosys beats estimates", "Infosys shares rally", "Third"]);
        assert!(parse_headlines("oops", 5).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_returns_empty() {
        let news = client(None, NewsCache::in_memory(Duration::from_secs(60)));
        assert!(news.fetch_headlines("INFY").await.is_empty());

        let news = client(Some("  "), NewsCache::in_memory(Duration::from_secs(60)));
        assert!(news.fetch_headlines("INFY").await.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_request() {
        let cache = NewsCache::in_memory(Duration::from_secs(2700));
        cache.insert("INFY", vec!["cached headline".into()], Utc::now());

        let news = client(Some("key"), cache);
        assert_eq!(news.fetch_headlines("INFY").await, vec!["cached headline"]);
    }

    #[tokio::test]
    async fn test_request_failure_returns_empty() {
        let news = client(Some("key"), NewsCache::in_memory(Duration::from_secs(60)));
        assert!(news.fetch_headlines("TCS").await.is_empty());
    }
}

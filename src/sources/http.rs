// src/sources/http.rs
// Shared HTTP client for job feeds: timeout, bounded retries and a TTL response cache

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use lru::LruCache;
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

use crate::utils::config::HttpConfig;

/// Owns the connection pool and the response cache. Built once per run and lent to
/// every source, so cached responses live exactly as long as the client does.
pub struct HttpClient {
    client: Client,
    max_retries: usize,
    cache_ttl: Duration,
    cache: Mutex<LruCache<Url, (Instant, Value)>>,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let capacity = NonZeroUsize::new(config.cache_capacity.max(1))
            .context("Cache capacity must be non-zero")?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            cache_ttl: config.cache_ttl,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// GETs `url` and decodes the body as JSON.
    ///
    /// A fresh cached body for the same URL is returned without touching the network.
    /// Failed attempts (transport errors, non-success status, undecodable body) are
    /// retried up to `max_retries` times with a linearly growing pause.
    pub async fn get_json(&self, url: &Url, headers: &[(&str, &str)]) -> Result<Value> {
        if let Some(body) = self.cached(url).await {
            debug!("Cache hit for {}", url);
            return Ok(body);
        }

        let attempts = self.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.attempt_get(url, headers).await {
                Ok(body) => {
                    self.store(url.clone(), body.clone()).await;
                    return Ok(body);
                }
                Err(e) => {
                    if attempt < attempts {
                        warn!("Request to {} failed (attempt {}/{}): {:#}", url, attempt, attempts, e);
                        tokio::time::sleep(Duration::from_millis(1000 * attempt as u64)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("No request attempted for {}", url)))
    }

    async fn attempt_get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<Value> {
        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url.host_str().unwrap_or("feed")))?;

        if !response.status().is_success() {
            return Err(anyhow!("API request failed with status: {}", response.status()));
        }

        response
            .json::<Value>()
            .await
            .context("Failed to decode response body as JSON")
    }

    async fn cached(&self, url: &Url) -> Option<Value> {
        let mut cache = self.cache.lock().await;
        let expired = match cache.peek(url) {
            Some((stored_at, _)) => stored_at.elapsed() >= self.cache_ttl,
            None => return None,
        };
        if expired {
            cache.pop(url);
            return None;
        }
        cache.get(url).map(|(_, body)| body.clone())
    }

    async fn store(&self, url: Url, body: Value) {
        let mut cache = self.cache.lock().await;
        if !cache.contains(&url) && cache.len() == cache.cap().get() {
            debug!("Response cache full ({} entries), evicting least recently used", cache.len());
        }
        cache.put(url, (Instant::now(), body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(ttl: Duration, capacity: usize) -> HttpConfig {
        HttpConfig {
            cache_ttl: ttl,
            cache_capacity: capacity,
            ..HttpConfig::default()
        }
    }

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.test/{}", path)).unwrap()
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let client = HttpClient::new(&config(Duration::from_secs(300), 4)).unwrap();
        client.store(url("a"), json!({"jobs": []})).await;

        assert_eq!(client.cached(&url("a")).await, Some(json!({"jobs": []})));
        assert_eq!(client.cached(&url("b")).await, None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_dropped() {
        let client = HttpClient::new(&config(Duration::ZERO, 4)).unwrap();
        client.store(url("a"), json!(1)).await;

        assert_eq!(client.cached(&url("a")).await, None);
        assert_eq!(client.cache.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn test_cache_is_bounded() {
        let client = HttpClient::new(&config(Duration::from_secs(300), 2)).unwrap();
        for i in 0..3 {
            client.store(url(&i.to_string()), json!(i)).await;
        }

        assert_eq!(client.cache.lock().await.len(), 2);
        assert_eq!(client.cached(&url("0")).await, None);
        assert_eq!(client.cached(&url("2")).await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_cached_body_skips_network() {
        // Unroutable host: only the cache can answer.
        let client = HttpClient::new(&config(Duration::from_secs(300), 4)).unwrap();
        let url = Url::parse("http://feed.invalid/jobs?category=design").unwrap();
        client.store(url.clone(), json!({"job-count": 0})).await;

        let body = client.get_json(&url, &[]).await.unwrap();
        assert_eq!(body, json!({"job-count": 0}));
    }
}

/// The fetch/cache collaborator: a `StatsProvider` trait the extraction core
/// consumes, and `EspnClient`, the reqwest-backed implementation with a
/// per-key TTL memory cache. Upstream failures surface as `None`, never as
/// errors — live display surfaces would rather show nothing than crash.
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_API: &str = "https://site.api.espn.com/apis/site/v2/sports";

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// What the extraction core requires from the fetch/cache layer. Both calls
/// must tolerate upstream failure by returning `None`; the caller supplies
/// the cache key and the freshness window, the implementation owns the rest
/// of the caching policy.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch the scoreboard for a sport/league pair.
    async fn fetch_scoreboard(
        &self,
        sport: &str,
        league: &str,
        cache_key: &str,
        ttl: Duration,
    ) -> Option<Value>;

    /// Generic cached GET returning parsed JSON.
    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
        cache_key: &str,
        ttl: Duration,
    ) -> Option<Value>;
}

struct CacheEntry {
    fetched_at: Instant,
    value: Value,
}

/// ESPN client backed by the public site API.
pub struct EspnClient {
    client: Client,
    timeout: Duration,
    base_url: String,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for EspnClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("statlead/0.1 (live stat leaders)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            base_url: ESPN_SITE_API.to_owned(),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl EspnClient {
    pub fn new() -> Self {
        Self::default()
    }

    async fn request(&self, url: &str, params: &[(String, String)]) -> ApiResult<Value> {
        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<Value>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    fn cache_lookup(&self, key: &str, ttl: Duration) -> Option<Value> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.get(key)?;
        if entry.fetched_at.elapsed() < ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn cache_store(&self, key: &str, value: &Value) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert(
            key.to_owned(),
            CacheEntry { fetched_at: Instant::now(), value: value.clone() },
        );
    }

    async fn cached_get(
        &self,
        url: &str,
        params: &[(String, String)],
        cache_key: &str,
        ttl: Duration,
    ) -> Option<Value> {
        if let Some(hit) = self.cache_lookup(cache_key, ttl) {
            debug!("cache hit for {cache_key}");
            return Some(hit);
        }

        match self.request(url, params).await {
            Ok(value) => {
                self.cache_store(cache_key, &value);
                Some(value)
            }
            Err(err) => {
                warn!("{err}");
                None
            }
        }
    }
}

#[async_trait]
impl StatsProvider for EspnClient {
    async fn fetch_scoreboard(
        &self,
        sport: &str,
        league: &str,
        cache_key: &str,
        ttl: Duration,
    ) -> Option<Value> {
        let url = format!("{}/{sport}/{league}/scoreboard", self.base_url);
        self.cached_get(&url, &[], cache_key, ttl).await
    }

    async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
        cache_key: &str,
        ttl: Duration,
    ) -> Option<Value> {
        self.cached_get(url, params, cache_key, ttl).await
    }
}

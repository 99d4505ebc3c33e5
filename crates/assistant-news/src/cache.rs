//! TTL cache for fetched headlines.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use assistant_core::error::NewsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Headlines for one symbol and when they were fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedHeadlines {
    /// Fetch time as Unix seconds
    pub ts: f64,
    #[serde(default)]
    pub headlines: Vec<String>,
}

impl CachedHeadlines {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.timestamp_millis() as f64 / 1000.0 - self.ts;
        age < ttl.as_secs_f64()
    }
}

/// Storage backend for the headline cache.
pub trait CacheStore: Send + Sync {
    fn load(&self) -> Result<HashMap<String, CachedHeadlines>, NewsError>;

    fn save(&self, entries: &HashMap<String, CachedHeadlines>) -> Result<(), NewsError>;
}

/// Keeps the cache for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CachedHeadlines>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<HashMap<String, CachedHeadlines>, NewsError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, entries: &HashMap<String, CachedHeadlines>) -> Result<(), NewsError> {
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = entries.clone();
        Ok(())
    }
}

/// Persists the cache as a JSON object keyed by symbol.
#[derive(Debug, Clone)]
pub struct JsonFileCacheStore {
    path: PathBuf,
}

impl JsonFileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CacheStore for JsonFileCacheStore {
    fn load(&self) -> Result<HashMap<String, CachedHeadlines>, NewsError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| NewsError::Cache(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| NewsError::Cache(e.to_string()))
    }

    fn save(&self, entries: &HashMap<String, CachedHeadlines>) -> Result<(), NewsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| NewsError::Cache(e.to_string()))?;
        }
        let text =
            serde_json::to_string_pretty(entries).map_err(|e| NewsError::Cache(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| NewsError::Cache(e.to_string()))
    }
}

/// Headline cache with a fixed time-to-live.
///
/// Entries are loaded from the store once on construction and written back
/// after every insert. Store failures are logged, never returned.
pub struct NewsCache {
    ttl: Duration,
    store: Box<dyn CacheStore>,
    entries: Mutex<HashMap<String, CachedHeadlines>>,
}

impl NewsCache {
    pub fn new(ttl: Duration, store: Box<dyn CacheStore>) -> Self {
        let entries = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not load news cache, starting empty");
            HashMap::new()
        });

        Self {
            ttl,
            store,
            entries: Mutex::new(entries),
        }
    }

    /// In-memory cache with the given TTL.
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(ttl, Box::new(MemoryCacheStore::new()))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Headlines for `symbol` if they were fetched less than one TTL ago.
    pub fn get_fresh(&self, symbol: &str, now: DateTime<Utc>) -> Option<Vec<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(symbol)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.headlines.clone())
    }

    /// Store freshly fetched headlines and persist the whole cache.
    pub fn insert(&self, symbol: &str, headlines: Vec<String>, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            symbol.to_string(),
            CachedHeadlines {
                ts: now.timestamp_millis() as f64 / 1000.0,
                headlines,
            },
        );

        if let Err(e) = self.store.save(&entries) {
            error!(error = %e, "Failed to persist news cache");
        }
    }
}

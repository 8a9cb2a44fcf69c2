use crate::codeforces::model::UserData;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    io::Write,
    path::PathBuf,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc, Mutex,
    },
};
use thiserror::Error;

pub const CACHE_PREFIX: &str = "cf_cache_";
pub const DEFAULT_TTL_MILLIS: i64 = 10 * 60 * 1000;

type Result<T> = std::result::Result<T, CacheError>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to access cache storage")]
    IoError(#[from] std::io::Error),
    #[error("failed to (de)serialize cache entry")]
    JsonError(#[from] serde_json::Error),
    #[error("cache storage lock poisoned")]
    Poisoned,
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn set(&self, now_millis: i64) {
        self.now.store(now_millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// String key-value storage behind the user data cache.
pub trait CacheStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<bool>;
    fn keys(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// `$XDG_CACHE_HOME/cf_wrapped`, or `$HOME/.cache/cf_wrapped`.
    pub fn default_directory() -> PathBuf {
        std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".cache")
            })
            .join("cf_wrapped")
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl CacheStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        // readers only ever see a complete entry
        let mut file = tempfile::NamedTempFile::new_in(&self.directory)?;
        file.write_all(value.as_bytes())?;
        file.persist(self.path(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedEntry {
    #[serde(flatten)]
    data: UserData,
    timestamp: i64,
}

pub fn cache_key(handle: &str) -> String {
    format!("{}{}", CACHE_PREFIX, handle.to_lowercase())
}

/// Per-handle cache of raw user data with a time-to-live.
///
/// Handles are case-insensitive. Entries older than the ttl are evicted on read.
/// Storage failures never surface to readers: a broken entry is a miss.
pub struct UserDataCache {
    store: Box<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    ttl_millis: i64,
}

impl UserDataCache {
    pub fn new(store: Box<dyn CacheStore>, clock: Arc<dyn Clock>, ttl_millis: i64) -> Self {
        Self {
            store,
            clock,
            ttl_millis,
        }
    }

    pub fn get(&self, handle: &str) -> Option<UserData> {
        let key = cache_key(handle);

        let raw = match self.store.get_raw(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("cache miss for {}", key);
                return None;
            }
            Err(e) => {
                tracing::warn!("failed to read cache entry {}: {:?}", key, e);
                return None;
            }
        };

        let entry: CachedEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("broken cache entry {}: {}", key, e);
                return None;
            }
        };

        let age = self.clock.now_millis() - entry.timestamp;
        if age > self.ttl_millis {
            tracing::debug!("cache entry {} expired, age {}s", key, age / 1000);
            if let Err(e) = self.store.remove(&key) {
                tracing::warn!("failed to evict cache entry {}: {:?}", key, e);
            }
            return None;
        }

        tracing::debug!("cache hit for {}, age {}s", key, age / 1000);
        Some(entry.data)
    }

    /// Stores `data` stamped with the current time. Failures are only logged.
    pub fn set(&self, handle: &str, data: &UserData) {
        let key = cache_key(handle);
        let entry = CachedEntry {
            data: data.clone(),
            timestamp: self.clock.now_millis(),
        };

        let result = serde_json::to_string(&entry)
            .map_err(CacheError::from)
            .and_then(|raw| {
                tracing::debug!("saving cache entry {} ({} KB)", key, raw.len() / 1024);
                self.store.set_raw(&key, &raw)
            });

        if let Err(e) = result {
            tracing::warn!("failed to save cache entry {}: {:?}", key, e);
        }
    }

    /// Removes the entry of `handle`, or every entry when `None`. Returns how many were removed.
    pub fn clear(&self, handle: Option<&str>) -> Result<usize> {
        match handle {
            Some(handle) => Ok(self.store.remove(&cache_key(handle))? as usize),
            None => {
                let mut removed = 0;
                for key in self.store.keys()? {
                    if key.starts_with(CACHE_PREFIX) && self.store.remove(&key)? {
                        removed += 1;
                    }
                }
                Ok(removed)
            }
        }
    }
}

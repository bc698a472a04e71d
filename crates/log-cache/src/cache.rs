//! In-Memory Cache Implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Default number of raw logs kept before eviction
pub const DEFAULT_LOG_CAPACITY: usize = 8;

/// One cached raw log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedLog {
    /// Cache-assigned id, increases with each store
    pub id: u64,
    /// Display name, usually the uploaded file name
    pub name: String,
    /// Raw log text as received
    pub text: String,
    /// Size of the text in bytes
    pub size_bytes: u64,
    /// When the log was stored
    pub stored_at: DateTime<Utc>,
}

/// Best-effort cache for raw logs and viewer settings
///
/// No durability is promised; implementations may drop anything at any
/// time and callers must tolerate an empty cache.
pub trait LogCache {
    /// Store a raw log, returning its cache id
    fn store_log(&mut self, name: &str, text: &str) -> u64;

    /// Most recently stored log, if any survived
    fn recent_log(&self) -> Option<&CachedLog>;

    /// Store a viewer setting
    fn set_setting(&mut self, key: &str, value: &str);

    /// Read a viewer setting, falling back to a default
    fn setting(&self, key: &str, default: &str) -> String;
}

/// In-memory cache, oldest log evicted first
#[derive(Debug, Clone)]
pub struct MemoryCache {
    logs: VecDeque<CachedLog>,
    settings: HashMap<String, String>,
    capacity: usize,
    next_id: u64,
}

impl MemoryCache {
    /// Create a cache holding at most `capacity` logs
    pub fn new(capacity: usize) -> Self {
        Self {
            logs: VecDeque::with_capacity(capacity.min(64)),
            settings: HashMap::new(),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Number of logs currently cached
    pub fn log_count(&self) -> usize {
        self.logs.len()
    }

    /// Look up a cached log by id
    pub fn log_by_id(&self, id: u64) -> Option<&CachedLog> {
        self.logs.iter().find(|log| log.id == id)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl LogCache for MemoryCache {
    fn store_log(&mut self, name: &str, text: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        if self.logs.len() >= self.capacity {
            if let Some(evicted) = self.logs.pop_front() {
                debug!("evicting cached log '{}' (id {})", evicted.name, evicted.id);
            }
        }

        self.logs.push_back(CachedLog {
            id,
            name: name.to_string(),
            text: text.to_string(),
            size_bytes: text.len() as u64,
            stored_at: Utc::now(),
        });
        id
    }

    fn recent_log(&self) -> Option<&CachedLog> {
        self.logs.back()
    }

    fn set_setting(&mut self, key: &str, value: &str) {
        self.settings.insert(key.to_string(), value.to_string());
    }

    fn setting(&self, key: &str, default: &str) -> String {
        self.settings
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_recall_recent() {
        let mut cache = MemoryCache::default();
        let id = cache.store_log("run1.csv", "Time,RPM\n0,1000\n");
        let recent = cache.recent_log().unwrap();
        assert_eq!(recent.id, id);
        assert_eq!(recent.name, "run1.csv");
        assert_eq!(recent.size_bytes, 16);
    }

    #[test]
    fn test_empty_cache_has_no_recent() {
        let cache = MemoryCache::default();
        assert!(cache.recent_log().is_none());
    }

    #[test]
    fn test_oldest_log_is_evicted_first() {
        let mut cache = MemoryCache::new(2);
        let first = cache.store_log("a.csv", "x");
        cache.store_log("b.csv", "y");
        cache.store_log("c.csv", "z");

        assert_eq!(cache.log_count(), 2);
        assert!(cache.log_by_id(first).is_none());
        assert_eq!(cache.recent_log().unwrap().name, "c.csv");
    }

    #[test]
    fn test_settings_with_default() {
        let mut cache = MemoryCache::default();
        assert_eq!(cache.setting("theme", "dark"), "dark");
        cache.set_setting("theme", "light");
        assert_eq!(cache.setting("theme", "dark"), "light");
    }
}

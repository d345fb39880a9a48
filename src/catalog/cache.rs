//! On-disk cache of raw search responses.
//!
//! Each entry is a small JSON file named after its key, holding the payload
//! text and the time it was stored. Entries older than the TTL read as misses.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Default time-to-live for cached responses
pub const DEFAULT_CACHE_TTL_DAYS: u32 = 30;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode cache entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key-addressed store for raw response text
pub trait ResponseCache {
    /// Fetch a fresh entry, or `None` if absent or expired
    fn get(&self, key: &str) -> Option<String>;

    /// Store `payload` under `key`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the entry cannot be written.
    fn put(&self, key: &str, payload: &str) -> Result<(), CacheError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    created_at: DateTime<Utc>,
    payload: String,
}

/// File-per-key cache rooted at a directory
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCache {
    /// Open (creating if needed) a cache directory
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>, ttl_days: u32) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            ttl: Duration::days(i64::from(ttl_days)),
        })
    }

    /// Default cache location: `<user cache dir>/oeis_probe`
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("oeis_probe")
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read_entry(&self, key: &str) -> Option<CacheEntry> {
        let text = std::fs::read_to_string(self.entry_path(key)).ok()?;
        match serde_json::from_str(&text) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Ignoring unreadable cache entry {key}: {e}");
                None
            }
        }
    }
}

impl ResponseCache for DiskCache {
    fn get(&self, key: &str) -> Option<String> {
        let entry = self.read_entry(key)?;
        if entry.created_at < Utc::now() - self.ttl {
            debug!("Cache entry {key} expired at {}", entry.created_at + self.ttl);
            return None;
        }
        Some(entry.payload)
    }

    fn put(&self, key: &str, payload: &str) -> Result<(), CacheError> {
        let entry = CacheEntry {
            created_at: Utc::now(),
            payload: payload.to_string(),
        };

        // Write beside the target, then rename over it
        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer(&mut file, &entry)?;
        file.flush()?;
        file.persist(self.entry_path(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path().join("nested"), 30).unwrap();

        assert_eq!(cache.get("abc"), None);
        cache.put("abc", r#"[{"number":45}]"#).unwrap();
        assert_eq!(cache.get("abc").as_deref(), Some(r#"[{"number":45}]"#));
    }

    #[test]
    fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), 30).unwrap();

        cache.put("k", "1").unwrap();
        cache.put("k", "2").unwrap();
        assert_eq!(cache.get("k").as_deref(), Some("2"));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), 30).unwrap();

        let stale = CacheEntry {
            created_at: Utc::now() - Duration::days(31),
            payload: "old".to_string(),
        };
        std::fs::write(
            cache.entry_path("stale"),
            serde_json::to_string(&stale).unwrap(),
        )
        .unwrap();

        assert_eq!(cache.get("stale"), None);
    }

    #[test]
    fn test_zero_ttl_expires_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), 0).unwrap();

        let entry = CacheEntry {
            created_at: Utc::now() - Duration::seconds(5),
            payload: "x".to_string(),
        };
        std::fs::write(cache.entry_path("k"), serde_json::to_string(&entry).unwrap()).unwrap();
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), 30).unwrap();
        std::fs::write(cache.entry_path("bad"), "not json").unwrap();
        assert_eq!(cache.get("bad"), None);
    }
}

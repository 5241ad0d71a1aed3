//! Read-through cache for per-user upload history.
//!
//! Entries expire after a TTL and are additionally invalidated synchronously
//! whenever an upload is recorded for that user, so upload counts are never
//! stale right after an upload. Purely an optimization: the database remains
//! the source of truth.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::UploadEntry;

struct CachedHistory {
    fetched_at: Instant,
    entries: Vec<UploadEntry>,
}

/// TTL cache of `list_uploads` results, keyed by username.
pub struct HistoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedHistory>>,
}

impl HistoryCache {
    pub fn new(ttl: Duration) -> Self {
        HistoryCache {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a user's upload history, newest first, hitting the database only
    /// on miss or expiry.
    pub async fn list_uploads(&self, pool: &DbPool, username: &str) -> AppResult<Vec<UploadEntry>> {
        {
            let cache = self.entries.read().expect("history cache lock poisoned");
            if let Some(cached) = cache.get(username) {
                if cached.fetched_at.elapsed() < self.ttl {
                    return Ok(cached.entries.clone());
                }
            }
        }

        let entries = pool.list_uploads(username).await?;

        let mut cache = self.entries.write().expect("history cache lock poisoned");
        cache.insert(
            username.to_string(),
            CachedHistory {
                fetched_at: Instant::now(),
                entries: entries.clone(),
            },
        );

        Ok(entries)
    }

    /// Drop the cached history for a user. Must be called synchronously
    /// after every successful upload record insert.
    pub fn invalidate(&self, username: &str) {
        let mut cache = self.entries.write().expect("history cache lock poisoned");
        cache.remove(username);
    }
}

//! Query-per-key cache for backend reads.
//!
//! An entry belongs to one caller (the hash of their bearer token) and one
//! backend path (`provincias`, `clientes/4`). A caller only ever reads what
//! the backend already served to that same token. A mutation on a resource
//! invalidates every key under that resource, for every caller.

use crate::models::Resource;
use crate::services::ApiError;
use dashmap::DashMap;
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

/// Entries kept before an insert sweeps out the stale ones.
pub const DEFAULT_PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    scope: String,
    path: String,
}

struct CachedQuery {
    value: Value,
    fetched_at: Instant,
}

pub struct QueryCache {
    entries: DashMap<CacheKey, CachedQuery>,
    stale_after: Duration,
    prune_threshold: usize,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            stale_after,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }

    pub fn with_prune_threshold(mut self, threshold: usize) -> Self {
        self.prune_threshold = threshold;
        self
    }

    fn key(scope: &str, path: &str) -> CacheKey {
        CacheKey {
            scope: scope.to_string(),
            path: path.to_string(),
        }
    }

    /// Fresh cached value for `path` as seen by `scope`, if any.
    pub fn get(&self, scope: &str, path: &str) -> Option<Value> {
        self.entries
            .get(&Self::key(scope, path))
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_after)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, scope: &str, path: &str, value: Value) {
        if self.entries.len() >= self.prune_threshold {
            self.prune_stale();
        }

        self.entries.insert(
            Self::key(scope, path),
            CachedQuery {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Returns the cached value or runs `fetch` and caches its result.
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        scope: &str,
        path: &str,
        fetch: F,
    ) -> Result<Value, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        if let Some(value) = self.get(scope, path) {
            tracing::debug!(path, "Query cache hit");
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(scope, path, value.clone());
        Ok(value)
    }

    /// Drops every key of `resource`, whoever fetched it. Returns how many
    /// entries went away.
    pub fn invalidate(&self, resource: Resource) -> usize {
        let prefix = format!("{}/", resource.as_str());
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key.path != resource.as_str() && !key.path.starts_with(&prefix));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            tracing::debug!(resource = %resource, removed, "Query cache invalidated");
        }
        removed
    }

    /// Removes entries past the staleness window. Returns how many went away.
    pub fn prune_stale(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() < self.stale_after);
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            tracing::debug!(removed, "Query cache pruned");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

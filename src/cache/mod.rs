//! Read-through cache for API resources.
//!
//! Entries are keyed by [`QueryKey`], the identity tuple of the resource
//! they hold. The contract for writers:
//!
//! - a read returns the fresh entry for its key, or fetches and stores it;
//! - a mutation may first write the returned entity into every entry that
//!   shows it (`set` / `update`), then **must** `invalidate` those keys;
//! - an invalidated entry is stale: the next read re-fetches it, and only
//!   falls back to the stale value when that fetch fails.

mod key;

pub use key::QueryKey;

use crate::errors::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Entry {
    value: serde_json::Value,
    stale: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stale_served: u64,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
    stats: CacheStats,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[cfg(test)]
    fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| !e.stale)
    }

    /// Return the fresh entry for `key`, or run `fetch` and store its result.
    pub fn get_or_fetch<T, F>(&mut self, key: QueryKey, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> AppResult<T>,
    {
        if let Some(entry) = self.entries.get(&key)
            && !entry.stale
        {
            self.stats.hits += 1;
            debug!(?key, "cache hit");
            return Ok(serde_json::from_value(entry.value.clone())?);
        }

        self.stats.misses += 1;
        match fetch() {
            Ok(value) => {
                self.set(key, &value)?;
                Ok(value)
            }
            Err(e) => match self.entries.get(&key) {
                Some(entry) => {
                    warn!(?key, error = %e, "refetch failed, serving stale entry");
                    self.stats.stale_served += 1;
                    Ok(serde_json::from_value(entry.value.clone())?)
                }
                None => Err(e),
            },
        }
    }

    /// Current value for `key`, fresh or stale.
    #[cfg(test)]
    fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|e| serde_json::from_value(e.value.clone()).ok())
    }

    pub fn set<T: Serialize>(&mut self, key: QueryKey, value: &T) -> AppResult<()> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key, Entry { value, stale: false });
        Ok(())
    }

    /// Patch an existing entry in place. Missing entries are left missing.
    pub fn update<T, F>(&mut self, key: &QueryKey, f: F) -> AppResult<bool>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let Some(entry) = self.entries.get_mut(key) else {
            return Ok(false);
        };
        let mut value: T = serde_json::from_value(entry.value.clone())?;
        f(&mut value);
        entry.value = serde_json::to_value(&value)?;
        Ok(true)
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(e) = self.entries.get_mut(key) {
            debug!(?key, "invalidate");
            e.stale = true;
        }
    }

    pub fn invalidate_where<P: Fn(&QueryKey) -> bool>(&mut self, pred: P) {
        for (key, e) in self.entries.iter_mut() {
            if pred(key) {
                debug!(?key, "invalidate");
                e.stale = true;
            }
        }
    }
}

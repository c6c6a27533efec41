use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::domain::team::Team;
use crate::models::TeamsRequest;

/// LRU of solved requests, keyed by the request's canonical JSON.
///
/// Solving is deterministic, so a hit returns exactly what a fresh solve
/// would.
pub struct SolveCache {
    entries: Option<Mutex<LruCache<String, Vec<Team>>>>,
}

impl SolveCache {
    /// A capacity of 0 disables caching
    pub fn new(capacity: usize) -> Self {
        SolveCache {
            entries: NonZeroUsize::new(capacity).map(|c| Mutex::new(LruCache::new(c))),
        }
    }

    /// `None` when the request cannot be serialized (e.g. non-finite scores)
    pub fn key(request: &TeamsRequest) -> Option<String> {
        serde_json::to_string(request).ok()
    }

    pub fn get(&self, key: &str) -> Option<Vec<Team>> {
        self.entries.as_ref()?.lock().get(key).cloned()
    }

    pub fn put(&self, key: String, teams: Vec<Team>) {
        if let Some(entries) = &self.entries {
            entries.lock().put(key, teams);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| entries.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matcher::CloseMatch;
use crate::client::SearchContext;

/// Default number of recent searches kept
pub const DEFAULT_RECENT_SEARCHES_LIMIT: usize = 5;

/// One submitted query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearchEntry {
    pub query: String,
    pub recorded_at: DateTime<Utc>,
}

impl RecentSearchEntry {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Newest-first history of submitted queries, bounded by `capacity`
#[derive(Debug, Clone)]
pub struct RecentSearchStore {
    entries: Vec<RecentSearchEntry>,
    capacity: usize,
}

impl Default for RecentSearchStore {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_SEARCHES_LIMIT)
    }
}

impl RecentSearchStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a store from previously persisted entries (newest first)
    pub fn from_entries(entries: Vec<RecentSearchEntry>, capacity: usize) -> Self {
        let mut store = Self::new(capacity);
        store.entries = entries
            .into_iter()
            .filter(|entry| !entry.query.trim().is_empty())
            .collect();
        store.entries.truncate(capacity);
        store
    }

    /// Record a submitted query
    ///
    /// The query is trimmed; empty queries and repeats of the newest entry
    /// are ignored. Returns true if an entry was stored.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.entries.first().is_some_and(|head| head.query == query) {
            return false;
        }
        if self.capacity == 0 {
            return false;
        }

        self.entries.insert(0, RecentSearchEntry::new(query));
        self.entries.truncate(self.capacity);
        true
    }

    pub fn list(&self) -> &[RecentSearchEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the limit; shrinking drops the oldest entries immediately
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.truncate(capacity);
    }

    /// Entries that are a close match for the live query
    ///
    /// Recent searches are never shown while scoped to a vertical.
    pub fn filter(
        &self,
        live_query: &str,
        context: &SearchContext,
        matcher: &dyn CloseMatch,
    ) -> Vec<RecentSearchEntry> {
        if context.is_vertical() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| matcher.is_close_match(&entry.query, live_query))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "recent_store_tests.rs"]
mod recent_store_tests;

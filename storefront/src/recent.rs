//! Recent searches, most recent first.

use crate::storage::{ClientStorage, RECENT_SEARCHES_KEY, load_json_or_default, save_json};
use std::sync::Arc;

/// How many recent searches are kept
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Recent search list persisted under `recentSearches`.
///
/// Entries are unique and capped at [`MAX_RECENT_SEARCHES`]. Every change is
/// written through; write failures are logged and the list stays usable in
/// memory.
#[derive(Clone)]
pub struct RecentSearches {
    storage: Arc<dyn ClientStorage>,
    entries: Vec<String>,
}

impl RecentSearches {
    /// Load the stored list; unreadable data loads as empty
    #[must_use]
    pub fn load(storage: Arc<dyn ClientStorage>) -> Self {
        let mut entries: Vec<String> = load_json_or_default(storage.as_ref(), RECENT_SEARCHES_KEY);
        entries.truncate(MAX_RECENT_SEARCHES);
        Self { storage, entries }
    }

    /// Entries, most recent first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `query` to the front, returning false if it was blank
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_RECENT_SEARCHES);
        self.persist();
        true
    }

    /// Drop `query`, returning whether it was present
    pub fn remove(&mut self, query: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != query);
        if self.entries.len() == before {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(error) = save_json(self.storage.as_ref(), RECENT_SEARCHES_KEY, &self.entries) {
            tracing::warn!(%error, "Failed to persist recent searches");
        }
    }
}

impl std::fmt::Debug for RecentSearches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentSearches")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

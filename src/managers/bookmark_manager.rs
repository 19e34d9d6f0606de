//! Bookmark Manager for Jobflow.
//!
//! Implements `BookmarkManagerTrait`: per-kind sets of bookmarked listing ids,
//! persisted as JSON arrays in [`LocalStorage`] under the kind's bookmark key.
//!
//! Storage failures never reach the caller: an unreadable set reads as empty
//! and a failed write leaves the previous membership in place.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::database::LocalStorage;
use crate::types::kind::ListingKind;

/// Trait defining bookmark operations.
pub trait BookmarkManagerTrait: Send + Sync {
    fn is_bookmarked(&self, kind: ListingKind, id: i64) -> bool;
    /// Flips membership and returns the new state.
    fn toggle_bookmark(&self, kind: ListingKind, id: i64) -> bool;
    /// Adds `id` if absent. Returns `true` when the set changed.
    fn add_bookmark(&self, kind: ListingKind, id: i64) -> bool;
    /// Removes `id` if present. Returns `true` when the set changed.
    fn remove_bookmark(&self, kind: ListingKind, id: i64) -> bool;
    /// Bookmarked ids in insertion order.
    fn bookmarked_ids(&self, kind: ListingKind) -> Vec<i64>;
    /// Drops every id not in `live_ids`. Returns how many were removed.
    fn prune(&self, kind: ListingKind, live_ids: &[i64]) -> usize;
    fn clear(&self, kind: ListingKind);
}

/// Bookmark store backed by a shared [`LocalStorage`].
#[derive(Clone)]
pub struct BookmarkManager {
    storage: Arc<dyn LocalStorage>,
}

impl BookmarkManager {
    /// Creates a new `BookmarkManager` over the provided storage.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Reads the set for `kind`. Missing, unreadable or malformed values are empty.
    fn read_set(&self, kind: ListingKind) -> Vec<i64> {
        let key = kind.spec().bookmark_key;
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read bookmark set, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<i64>>(&raw) {
            Ok(mut ids) => {
                dedup_in_order(&mut ids);
                ids
            }
            Err(e) => {
                warn!(key, error = %e, "Corrupt bookmark set, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persists the set for `kind`. Returns `false` if the write failed.
    fn write_set(&self, kind: ListingKind, ids: &[i64]) -> bool {
        let key = kind.spec().bookmark_key;
        let encoded = match serde_json::to_string(ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key, error = %e, "Failed to encode bookmark set");
                return false;
            }
        };
        match self.storage.set_item(key, &encoded) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Failed to persist bookmark set");
                false
            }
        }
    }
}

fn dedup_in_order(ids: &mut Vec<i64>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(*id));
}

impl BookmarkManagerTrait for BookmarkManager {
    fn is_bookmarked(&self, kind: ListingKind, id: i64) -> bool {
        self.read_set(kind).contains(&id)
    }

    fn toggle_bookmark(&self, kind: ListingKind, id: i64) -> bool {
        let mut ids = self.read_set(kind);
        let was_bookmarked = ids.contains(&id);
        if was_bookmarked {
            ids.retain(|existing| *existing != id);
        } else {
            ids.push(id);
        }

        if self.write_set(kind, &ids) {
            debug!(%kind, id, bookmarked = !was_bookmarked, "Bookmark toggled");
            !was_bookmarked
        } else {
            was_bookmarked
        }
    }

    fn add_bookmark(&self, kind: ListingKind, id: i64) -> bool {
        let mut ids = self.read_set(kind);
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        self.write_set(kind, &ids)
    }

    fn remove_bookmark(&self, kind: ListingKind, id: i64) -> bool {
        let mut ids = self.read_set(kind);
        let before = ids.len();
        ids.retain(|existing| *existing != id);
        if ids.len() == before {
            return false;
        }
        self.write_set(kind, &ids)
    }

    fn bookmarked_ids(&self, kind: ListingKind) -> Vec<i64> {
        self.read_set(kind)
    }

    fn prune(&self, kind: ListingKind, live_ids: &[i64]) -> usize {
        let mut ids = self.read_set(kind);
        let before = ids.len();
        ids.retain(|id| live_ids.contains(id));
        let removed = before - ids.len();
        if removed == 0 {
            return 0;
        }
        if self.write_set(kind, &ids) {
            debug!(%kind, removed, "Pruned stale bookmarks");
            removed
        } else {
            0
        }
    }

    fn clear(&self, kind: ListingKind) {
        let key = kind.spec().bookmark_key;
        if let Err(e) = self.storage.remove_item(key) {
            warn!(key, error = %e, "Failed to clear bookmark set");
        }
    }
}

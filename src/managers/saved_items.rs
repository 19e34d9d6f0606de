//! Saved-items page: resolves the local bookmark sets into full records.
//!
//! Each kind with bookmarks fetches its list and keeps the bookmarked
//! records. Ids the list did not cover are looked up one by one; a 404 marks
//! the id as gone so the caller can prune it. Any other failure degrades to
//! "not shown" for that kind or id, never to an error.

use std::collections::HashSet;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::services::api_client::ApiClient;
use crate::types::errors::RequestError;
use crate::types::kind::ListingKind;
use crate::types::listing::{Event, Job, ListingRecord, Scholarship};
use crate::types::query::QueryParams;

/// Bookmarked records of one kind plus the ids that no longer resolve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedGroup<T> {
    pub items: Vec<T>,
    pub missing: Vec<i64>,
}

impl<T> Default for SavedGroup<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            missing: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SavedItems {
    pub jobs: SavedGroup<Job>,
    pub scholarships: SavedGroup<Scholarship>,
    pub events: SavedGroup<Event>,
}

impl SavedItems {
    /// Loads all three kinds concurrently.
    pub async fn load(client: &ApiClient, bookmarks: &dyn BookmarkManagerTrait) -> Self {
        let job_ids = bookmarks.bookmarked_ids(ListingKind::Job);
        let scholarship_ids = bookmarks.bookmarked_ids(ListingKind::Scholarship);
        let event_ids = bookmarks.bookmarked_ids(ListingKind::Event);

        let (jobs, scholarships, events) = futures::join!(
            load_group::<Job>(client, &job_ids),
            load_group::<Scholarship>(client, &scholarship_ids),
            load_group::<Event>(client, &event_ids),
        );

        let saved = Self {
            jobs,
            scholarships,
            events,
        };
        debug!(total = saved.total(), "Saved items loaded");
        saved
    }

    pub fn total(&self) -> usize {
        self.jobs.items.len() + self.scholarships.items.len() + self.events.items.len()
    }

    pub fn missing(&self, kind: ListingKind) -> &[i64] {
        match kind {
            ListingKind::Job => &self.jobs.missing,
            ListingKind::Scholarship => &self.scholarships.missing,
            ListingKind::Event => &self.events.missing,
        }
    }

    /// Drops ids that no longer resolve. Returns how many were removed.
    pub fn prune(&self, bookmarks: &dyn BookmarkManagerTrait) -> usize {
        ListingKind::ALL
            .iter()
            .map(|kind| {
                let missing = self.missing(*kind);
                if missing.is_empty() {
                    return 0;
                }
                let live: Vec<i64> = bookmarks
                    .bookmarked_ids(*kind)
                    .into_iter()
                    .filter(|id| !missing.contains(id))
                    .collect();
                bookmarks.prune(*kind, &live)
            })
            .sum()
    }
}

async fn load_group<T: ListingRecord>(client: &ApiClient, ids: &[i64]) -> SavedGroup<T> {
    if ids.is_empty() {
        return SavedGroup::default();
    }

    let listed = match client.listings::<T>().list(&QueryParams::new()).await {
        Ok(page) => page.items,
        Err(e) => {
            warn!(kind = %T::KIND, error = %e, "Failed to load saved listings");
            return SavedGroup::default();
        }
    };

    let wanted: HashSet<i64> = ids.iter().copied().collect();
    let mut found: Vec<T> = listed
        .into_iter()
        .filter(|record| wanted.contains(&record.id()))
        .collect();

    let covered: HashSet<i64> = found.iter().map(|r| r.id()).collect();
    let leftovers: Vec<i64> = ids.iter().copied().filter(|id| !covered.contains(id)).collect();

    let lookups = leftovers.iter().map(|id| async move {
        let result: Result<T, RequestError> = client.listings::<T>().get(*id).await;
        (*id, result)
    });

    let mut missing = Vec::new();
    for (id, result) in join_all(lookups).await {
        match result {
            Ok(record) => found.push(record),
            Err(e) if e.is_not_found() => missing.push(id),
            Err(e) => warn!(kind = %T::KIND, id, error = %e, "Failed to resolve saved listing"),
        }
    }

    // Present in bookmark order.
    found.sort_by_key(|record| ids.iter().position(|id| *id == record.id()));
    SavedGroup {
        items: found,
        missing,
    }
}

//! Card and detail-modal view models for a single listing.
//!
//! One implementation serves every kind through [`ListingRecord`]. The card's
//! bookmark control and its body are separate targets: bookmarking toggles
//! the local store and never opens the modal.

use serde::Serialize;
use tracing::debug;

use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::services::image_service;
use crate::types::listing::ListingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Featured,
    Facet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub label: String,
}

/// What the modal's "Apply" action resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub url: String,
    /// Open in a new browsing context (tab or window).
    pub new_context: bool,
}

/// Banner to show for `record` before any load failure.
fn initial_image<T: ListingRecord>(record: &T) -> String {
    image_service::banner_for(record)
}

fn alt_text<T: ListingRecord>(record: &T) -> String {
    record
        .image_alt()
        .map(str::to_string)
        .unwrap_or_else(|| record.title().to_string())
}

/// Full-record dialog opened from a card.
#[derive(Debug, Clone, Serialize)]
pub struct DetailModal<T: ListingRecord> {
    record: T,
    bookmarked: bool,
    image_src: String,
    image_alt: String,
}

impl<T: ListingRecord> DetailModal<T> {
    /// Opens the modal, reading the bookmark flag fresh from the store.
    pub fn open(record: T, bookmarks: &dyn BookmarkManagerTrait) -> Self {
        let bookmarked = bookmarks.is_bookmarked(T::KIND, record.id());
        Self {
            image_src: initial_image(&record),
            image_alt: alt_text(&record),
            record,
            bookmarked,
        }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn image_alt(&self) -> &str {
        &self.image_alt
    }

    /// Declared facets with a value on this record, as `(label, value)`.
    pub fn facts(&self) -> Vec<(&'static str, &str)> {
        T::KIND
            .spec()
            .facets
            .iter()
            .filter_map(|f| self.record.facet(f.key).map(|v| (f.label, v)))
            .collect()
    }

    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        self.record.detail_sections()
    }

    pub fn toggle_bookmark(&mut self, bookmarks: &dyn BookmarkManagerTrait) -> bool {
        self.bookmarked = bookmarks.toggle_bookmark(T::KIND, self.record.id());
        self.bookmarked
    }

    pub fn image_failed(&mut self) {
        self.image_src = image_service::default_image_for(&self.record).to_string();
    }

    /// The listing's link, to be opened in a new context. `None` hides "Apply".
    pub fn apply(&self) -> Option<ExternalLink> {
        self.record.link().map(|url| ExternalLink {
            url: url.trim().to_string(),
            new_context: true,
        })
    }
}

/// Grid card for one listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCard<T: ListingRecord> {
    record: T,
    bookmarked: bool,
    image_src: String,
    image_alt: String,
    logo_src: Option<String>,
    modal: Option<DetailModal<T>>,
}

impl<T: ListingRecord> ListingCard<T> {
    pub fn new(record: T, bookmarks: &dyn BookmarkManagerTrait) -> Self {
        let bookmarked = bookmarks.is_bookmarked(T::KIND, record.id());
        Self {
            image_src: initial_image(&record),
            image_alt: alt_text(&record),
            logo_src: record.logo_image().map(str::to_string),
            record,
            bookmarked,
            modal: None,
        }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn id(&self) -> i64 {
        self.record.id()
    }

    pub fn title(&self) -> &str {
        self.record.title()
    }

    pub fn organization(&self) -> &str {
        self.record.organization()
    }

    pub fn location(&self) -> &str {
        self.record.location()
    }

    /// "Featured" first when applicable, then the kind's primary facet.
    pub fn badges(&self) -> Vec<Badge> {
        let mut badges = Vec::new();
        if self.record.is_featured() {
            badges.push(Badge {
                kind: BadgeKind::Featured,
                label: "Featured".to_string(),
            });
        }
        if let Some(value) = self.record.facet(T::KIND.spec().badge_facet) {
            badges.push(Badge {
                kind: BadgeKind::Facet,
                label: value.to_string(),
            });
        }
        badges
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn image_alt(&self) -> &str {
        &self.image_alt
    }

    pub fn logo_src(&self) -> Option<&str> {
        self.logo_src.as_deref()
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn modal(&self) -> Option<&DetailModal<T>> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut DetailModal<T>> {
        self.modal.as_mut()
    }

    /// Swaps the banner for the kind's stock image.
    pub fn image_failed(&mut self) {
        self.image_src = image_service::default_image_for(&self.record).to_string();
    }

    /// Hides the logo.
    pub fn logo_failed(&mut self) {
        self.logo_src = None;
    }

    /// Toggles the bookmark and returns the new flag. Leaves the modal alone.
    pub fn click_bookmark(&mut self, bookmarks: &dyn BookmarkManagerTrait) -> bool {
        self.bookmarked = bookmarks.toggle_bookmark(T::KIND, self.record.id());
        debug!(kind = %T::KIND, id = self.record.id(), bookmarked = self.bookmarked, "Card bookmark clicked");
        self.bookmarked
    }

    /// Opens the detail modal.
    pub fn click_body(&mut self, bookmarks: &dyn BookmarkManagerTrait) -> &mut DetailModal<T> {
        self.modal
            .insert(DetailModal::open(self.record.clone(), bookmarks))
    }

    /// Closes the modal and picks up any bookmark change made inside it.
    pub fn close_modal(&mut self, bookmarks: &dyn BookmarkManagerTrait) {
        if self.modal.take().is_some() {
            self.bookmarked = bookmarks.is_bookmarked(T::KIND, self.record.id());
        }
    }
}

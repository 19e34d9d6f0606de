//! Banner image selection for listing cards and modals.
//!
//! Every kind has a table of stock banners keyed by one facet (field of study,
//! event type, job category) and a catch-all default.

use crate::types::kind::ListingKind;
use crate::types::listing::ListingRecord;

const SCHOLARSHIP_DEFAULT: &str =
    "https://images.unsplash.com/photo-1523050854058-8df90110c9f1?w=800&h=400&fit=crop&auto=format";

const EVENT_DEFAULT: &str =
    "https://images.unsplash.com/photo-1511632765486-a01980e01a18?w=800&h=400&fit=crop&auto=format";

const FIELD_OF_STUDY_IMAGES: &[(&str, &str)] = &[
    ("Engineering", "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=800&h=400&fit=crop&auto=format"),
    ("Medicine", "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=800&h=400&fit=crop&auto=format"),
    ("Business", "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&h=400&fit=crop&auto=format"),
    ("Arts", "https://images.unsplash.com/photo-1513475382585-d06e58bcb0e0?w=800&h=400&fit=crop&auto=format"),
    ("Science", "https://images.unsplash.com/photo-1532094349884-543bc11b234d?w=800&h=400&fit=crop&auto=format"),
    ("Technology", "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=800&h=400&fit=crop&auto=format"),
    ("Education", "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?w=800&h=400&fit=crop&auto=format"),
];

const EVENT_TYPE_IMAGES: &[(&str, &str)] = &[
    ("Fellowship", "https://images.unsplash.com/photo-1517486808906-6ca8b3f04846?w=800&h=400&fit=crop&auto=format"),
    ("Competition", "https://images.unsplash.com/photo-1552664730-d307ca884978?w=800&h=400&fit=crop&auto=format"),
    ("Training", "https://images.unsplash.com/photo-1524178232363-1fb2b075b655?w=800&h=400&fit=crop&auto=format"),
    ("Conference", "https://images.unsplash.com/photo-1505373877841-8d25f7d46678?w=800&h=400&fit=crop&auto=format"),
    ("Workshop", "https://images.unsplash.com/photo-1559223607-b4d0555ae227?w=800&h=400&fit=crop&auto=format"),
    ("Hackathon", "https://images.unsplash.com/photo-1504639725590-34d0984388bd?w=800&h=400&fit=crop&auto=format"),
    ("Bootcamp", "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?w=800&h=400&fit=crop&auto=format"),
    ("Awards", "https://images.unsplash.com/photo-1567427017947-545c5f8d16ad?w=800&h=400&fit=crop&auto=format"),
    ("Grants", "https://images.unsplash.com/photo-1554224155-8d04cb21cd6c?w=800&h=400&fit=crop&auto=format"),
];

fn lookup(table: &[(&str, &'static str)], key: Option<&str>) -> Option<&'static str> {
    let key = key?;
    table.iter().find(|(k, _)| *k == key).map(|(_, url)| *url)
}

/// Stock banner for a kind, keyed by the kind's image facet value.
pub fn default_image(kind: ListingKind, facet_value: Option<&str>) -> &'static str {
    match kind {
        ListingKind::Scholarship => {
            lookup(FIELD_OF_STUDY_IMAGES, facet_value).unwrap_or(SCHOLARSHIP_DEFAULT)
        }
        ListingKind::Event => lookup(EVENT_TYPE_IMAGES, facet_value).unwrap_or(EVENT_DEFAULT),
        // Job categories share the field-of-study artwork.
        ListingKind::Job => {
            lookup(FIELD_OF_STUDY_IMAGES, facet_value).unwrap_or(SCHOLARSHIP_DEFAULT)
        }
    }
}

/// Stock banner for a record, keyed by its own facet value.
pub fn default_image_for<T: ListingRecord>(record: &T) -> &'static str {
    let facet_value = T::KIND.spec().image_facet.and_then(|key| record.facet(key));
    default_image(T::KIND, facet_value)
}

/// Any absolute URL, whatever its scheme.
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url.trim()).is_ok()
}

/// The record's banner as stored, or its stock banner when none is set.
/// A banner that fails to load is swapped out by the card, not here.
pub fn banner_for<T: ListingRecord>(record: &T) -> String {
    match record.banner_image() {
        Some(url) => url.trim().to_string(),
        None => default_image_for(record).to_string(),
    }
}

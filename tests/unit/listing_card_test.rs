//! Unit tests for listing cards and the detail modal.

use std::sync::Arc;

use jobflow::database::Database;
use jobflow::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use jobflow::managers::listing_card::{BadgeKind, ListingCard};
use jobflow::services::image_service::default_image;
use jobflow::types::kind::ListingKind;
use jobflow::types::listing::{CompanyInfo, Event, Job, Scholarship};

fn bookmarks() -> BookmarkManager {
    BookmarkManager::new(Arc::new(Database::open_in_memory().unwrap()))
}

fn hackathon() -> Event {
    Event {
        id: 42,
        title: "Rust Hack Week".into(),
        organizer: "Ferris Society".into(),
        location: "Europe".into(),
        event_type: "Hackathon".into(),
        format: Some("Hybrid".into()),
        banner_image: Some("https://cdn.example/hack.png".into()),
        link: Some(" https://hack.example/register ".into()),
        description: Some("Three days of building.".into()),
        is_featured: true,
        is_active: true,
        ..Default::default()
    }
}

#[test]
fn test_bookmark_click_does_not_open_modal() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);

    assert!(card.click_bookmark(&store));
    assert!(!card.is_modal_open());
    assert!(store.is_bookmarked(ListingKind::Event, 42));

    assert!(!card.click_bookmark(&store));
    assert!(!card.is_modal_open());
    assert!(!store.is_bookmarked(ListingKind::Event, 42));
}

#[test]
fn test_card_reads_initial_bookmark_flag() {
    let store = bookmarks();
    store.add_bookmark(ListingKind::Event, 42);
    let card = ListingCard::new(hackathon(), &store);
    assert!(card.is_bookmarked());
}

#[test]
fn test_body_click_opens_modal_with_fresh_flag() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);
    store.add_bookmark(ListingKind::Event, 42);

    let modal = card.click_body(&store);
    assert!(modal.is_bookmarked());
    assert_eq!(modal.record().title, "Rust Hack Week");
    assert!(card.is_modal_open());
}

#[test]
fn test_close_modal_resyncs_card_flag() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);
    assert!(!card.is_bookmarked());

    card.click_body(&store).toggle_bookmark(&store);
    card.close_modal(&store);

    assert!(!card.is_modal_open());
    assert!(card.is_bookmarked());
}

#[test]
fn test_badges_featured_first_then_facet() {
    let store = bookmarks();
    let card = ListingCard::new(hackathon(), &store);
    let badges = card.badges();
    assert_eq!(badges.len(), 2);
    assert_eq!(badges[0].kind, BadgeKind::Featured);
    assert_eq!(badges[0].label, "Featured");
    assert_eq!(badges[1].kind, BadgeKind::Facet);
    assert_eq!(badges[1].label, "Hackathon");
}

#[test]
fn test_unfeatured_scholarship_shows_funding_badge_only() {
    let store = bookmarks();
    let card = ListingCard::new(
        Scholarship {
            id: 1,
            title: "Open Grant".into(),
            funding_type: "Partial".into(),
            ..Default::default()
        },
        &store,
    );
    let labels: Vec<String> = card.badges().into_iter().map(|b| b.label).collect();
    assert_eq!(labels, vec!["Partial"]);
}

#[test]
fn test_image_failure_falls_back_to_stock_banner() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);
    assert_eq!(card.image_src(), "https://cdn.example/hack.png");

    card.image_failed();
    assert_eq!(card.image_src(), default_image(ListingKind::Event, Some("Hackathon")));
}

#[test]
fn test_relative_banner_is_kept_until_it_fails() {
    let store = bookmarks();
    let mut event = hackathon();
    event.banner_image = Some("/uploads/banners/hack.png".into());
    let mut card = ListingCard::new(event, &store);
    assert_eq!(card.image_src(), "/uploads/banners/hack.png");

    card.image_failed();
    assert_eq!(card.image_src(), default_image(ListingKind::Event, Some("Hackathon")));
}

#[test]
fn test_image_alt_falls_back_to_title() {
    let store = bookmarks();
    let mut event = hackathon();
    let card = ListingCard::new(event.clone(), &store);
    assert_eq!(card.image_alt(), "Rust Hack Week");

    event.image_alt = Some("Participants at laptops".into());
    let card = ListingCard::new(event, &store);
    assert_eq!(card.image_alt(), "Participants at laptops");
}

#[test]
fn test_logo_failure_hides_logo() {
    let store = bookmarks();
    let job = Job {
        id: 8,
        title: "Backend Intern".into(),
        company: "Crab Labs".into(),
        company_info: Some(CompanyInfo {
            id: 2,
            name: "Crab Labs".into(),
            logo: Some("https://cdn.example/crab.png".into()),
            website: None,
        }),
        ..Default::default()
    };
    let mut card = ListingCard::new(job, &store);
    assert_eq!(card.logo_src(), Some("https://cdn.example/crab.png"));
    assert_eq!(card.organization(), "Crab Labs");

    card.logo_failed();
    assert_eq!(card.logo_src(), None);
}

#[test]
fn test_modal_apply_opens_new_context() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);
    let link = card.click_body(&store).apply().unwrap();
    assert_eq!(link.url, "https://hack.example/register");
    assert!(link.new_context);
}

#[test]
fn test_modal_facts_and_sections() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);
    let modal = card.click_body(&store);

    assert_eq!(
        modal.facts(),
        vec![("Event Type", "Hackathon"), ("Format", "Hybrid"), ("Location", "Europe")]
    );
    assert_eq!(modal.sections(), vec![("Description", "Three days of building.")]);
}

#[test]
fn test_modal_image_failure() {
    let store = bookmarks();
    let mut card = ListingCard::new(hackathon(), &store);
    let modal = card.click_body(&store);
    modal.image_failed();
    assert_eq!(modal.image_src(), default_image(ListingKind::Event, Some("Hackathon")));
}

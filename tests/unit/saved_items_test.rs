//! Unit tests for resolving bookmarks into saved-item groups.

use std::sync::Arc;

use jobflow::database::{Database, LocalStorage};
use jobflow::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use jobflow::managers::saved_items::SavedItems;
use jobflow::services::api_client::ApiClient;
use jobflow::types::kind::ListingKind;
use mockito::Server;
use serde_json::json;

struct Fixture {
    api: ApiClient,
    bookmarks: BookmarkManager,
}

fn fixture(url: &str) -> Fixture {
    let storage: Arc<dyn LocalStorage> = Arc::new(Database::open_in_memory().unwrap());
    Fixture {
        api: ApiClient::new(url, storage.clone()),
        bookmarks: BookmarkManager::new(storage),
    }
}

#[tokio::test]
async fn test_no_bookmarks_sends_no_requests() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let f = fixture(&server.url());
    let saved = SavedItems::load(&f.api, &f.bookmarks).await;
    assert_eq!(saved.total(), 0);
    m.assert_async().await;
}

#[tokio::test]
async fn test_list_is_filtered_to_bookmarks_in_bookmark_order() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/jobs")
        .with_status(200)
        .with_body(
            json!({"data": {"jobs": [
                {"id": 1, "title": "One"},
                {"id": 2, "title": "Two"},
                {"id": 3, "title": "Three"}
            ]}})
            .to_string(),
        )
        .create_async()
        .await;

    let f = fixture(&server.url());
    f.bookmarks.add_bookmark(ListingKind::Job, 3);
    f.bookmarks.add_bookmark(ListingKind::Job, 1);

    let saved = SavedItems::load(&f.api, &f.bookmarks).await;
    let ids: Vec<i64> = saved.jobs.items.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert!(saved.jobs.missing.is_empty());
    assert_eq!(saved.total(), 2);
    list.assert_async().await;
}

#[tokio::test]
async fn test_unlisted_ids_are_fetched_and_404s_marked_missing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/events")
        .with_status(200)
        .with_body(r#"{"data": {"events": [{"id": 1, "title": "Meetup"}]}}"#)
        .create_async()
        .await;
    let found = server
        .mock("GET", "/api/events/40")
        .with_status(200)
        .with_body(r#"{"data": {"id": 40, "title": "Archived Summit"}}"#)
        .create_async()
        .await;
    let gone = server
        .mock("GET", "/api/events/99")
        .with_status(404)
        .with_body(r#"{"message": "Event not found"}"#)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/api/events/50")
        .with_status(500)
        .create_async()
        .await;

    let f = fixture(&server.url());
    for id in [99, 40, 1, 50] {
        f.bookmarks.add_bookmark(ListingKind::Event, id);
    }

    let saved = SavedItems::load(&f.api, &f.bookmarks).await;
    let ids: Vec<i64> = saved.events.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![40, 1]);
    assert_eq!(saved.missing(ListingKind::Event), &[99]);

    assert_eq!(saved.prune(&f.bookmarks), 1);
    assert_eq!(f.bookmarks.bookmarked_ids(ListingKind::Event), vec![40, 1, 50]);

    found.assert_async().await;
    gone.assert_async().await;
    broken.assert_async().await;
}

#[tokio::test]
async fn test_failed_list_yields_empty_group() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/scholarships")
        .with_status(500)
        .with_body(r#"{"message": "Database unavailable"}"#)
        .create_async()
        .await;
    let lookups = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/scholarships/\d+$".into()))
        .expect(0)
        .create_async()
        .await;
    server
        .mock("GET", "/api/jobs")
        .with_status(200)
        .with_body(r#"{"data": {"jobs": [{"id": 7, "title": "Seven"}]}}"#)
        .create_async()
        .await;

    let f = fixture(&server.url());
    f.bookmarks.add_bookmark(ListingKind::Scholarship, 11);
    f.bookmarks.add_bookmark(ListingKind::Job, 7);

    let saved = SavedItems::load(&f.api, &f.bookmarks).await;
    assert!(saved.scholarships.items.is_empty());
    assert!(saved.scholarships.missing.is_empty());
    assert_eq!(saved.jobs.items.len(), 1);

    // Nothing missing, so nothing is pruned.
    assert_eq!(saved.prune(&f.bookmarks), 0);
    assert_eq!(f.bookmarks.bookmarked_ids(ListingKind::Scholarship), vec![11]);
    lookups.assert_async().await;
}

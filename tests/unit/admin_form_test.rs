//! Unit tests for the admin listing form.

use std::sync::Arc;

use jobflow::database::{Database, LocalStorage};
use jobflow::managers::admin_form::{delete_listing, template, AdminForm, FormOutcome};
use jobflow::services::api_client::ApiClient;
use jobflow::types::errors::{FormError, RequestError};
use jobflow::types::kind::ListingKind;
use jobflow::types::listing::{Event, Job};
use mockito::{Matcher, Server};
use rstest::rstest;
use serde_json::{json, Value};

fn client(url: &str) -> ApiClient {
    let storage: Arc<dyn LocalStorage> = Arc::new(Database::open_in_memory().unwrap());
    ApiClient::new(url, storage)
}

fn filled_event_form() -> AdminForm {
    let mut form = AdminForm::open_create(ListingKind::Event);
    form.set_field("title", json!("RustConf")).unwrap();
    form.set_field("organizer", json!("Rust Foundation")).unwrap();
    form.set_field("location", json!("United States")).unwrap();
    form
}

#[rstest]
#[case(ListingKind::Job, "jobType", json!("Full-time"))]
#[case(ListingKind::Job, "type", json!("Job"))]
#[case(ListingKind::Scholarship, "degree_level", json!("Undergraduate"))]
#[case(ListingKind::Scholarship, "funding_type", json!("Full"))]
#[case(ListingKind::Scholarship, "category", json!("Education"))]
#[case(ListingKind::Event, "event_type", json!("Conference"))]
#[case(ListingKind::Event, "format", json!("In-person"))]
#[case(ListingKind::Event, "category", json!("Technology"))]
#[case(ListingKind::Event, "isActive", json!(true))]
#[case(ListingKind::Event, "isFeatured", json!(false))]
fn test_create_defaults(#[case] kind: ListingKind, #[case] field: &str, #[case] expected: Value) {
    let form = AdminForm::open_create(kind);
    assert!(form.is_open());
    assert!(!form.is_edit());
    assert_eq!(form.field(field), Some(&expected));
}

#[test]
fn test_template_covers_every_field() {
    let form = AdminForm::open_create(ListingKind::Scholarship);
    assert_eq!(form.fields().len(), template(ListingKind::Scholarship).len());
}

#[test]
fn test_required_fields_block_submit() {
    let mut form = AdminForm::open_create(ListingKind::Job);
    let errors = form.validate();
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["title", "company", "location"]);
    assert_eq!(errors[0].message, "Title is required");

    assert_eq!(form.begin_submit().unwrap_err(), FormError::Invalid(3));
    assert!(!form.is_submitting());
}

#[test]
fn test_whitespace_only_required_field_is_missing() {
    let mut form = filled_event_form();
    form.set_field("title", json!("   ")).unwrap();
    assert!(!form.is_valid());
}

#[test]
fn test_url_fields_must_parse_as_urls() {
    let mut form = filled_event_form();
    form.set_field("banner_image", json!("not a url")).unwrap();
    let errors = form.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "banner_image");
    assert_eq!(errors[0].message, "Banner Image URL must be a valid URL");
}

#[test]
fn test_url_fields_accept_non_http_schemes() {
    let mut form = filled_event_form();
    form.set_field("link", json!("mailto:rsvp@example.org")).unwrap();
    form.set_field("banner_image", json!("ftp://cdn.example/a.png")).unwrap();
    assert!(form.validate().is_empty());
}

#[test]
fn test_set_field_rejects_unknown_and_mistyped_values() {
    let mut form = AdminForm::open_create(ListingKind::Event);
    assert_eq!(
        form.set_field("salaryRange", json!("100k")),
        Err(FormError::UnknownField("salaryRange".into()))
    );
    assert!(matches!(
        form.set_field("isFeatured", json!("yes")),
        Err(FormError::InvalidValue { .. })
    ));
    assert!(matches!(
        form.set_field("title", json!(12)),
        Err(FormError::InvalidValue { .. })
    ));
    match form.set_field("format", json!("Underwater")) {
        Err(FormError::InvalidValue { field, expected }) => {
            assert_eq!(field, "format");
            assert_eq!(expected, "one of In-person, Virtual, Hybrid");
        }
        other => panic!("expected invalid value, got {:?}", other),
    }
    assert_eq!(form.field("format"), Some(&json!("In-person")));
}

#[test]
fn test_begin_submit_guards_in_flight() {
    let mut form = filled_event_form();
    let submission = form.begin_submit().unwrap();
    assert!(form.is_submitting());
    assert_eq!(submission.record_id, None);
    assert_eq!(submission.payload["title"], json!("RustConf"));
    assert_eq!(form.begin_submit().unwrap_err(), FormError::SubmissionInFlight);
}

#[test]
fn test_closed_form_rejects_edits() {
    let mut form = filled_event_form();
    form.close();
    assert_eq!(form.set_field("title", json!("x")), Err(FormError::Closed));
    assert_eq!(form.begin_submit().unwrap_err(), FormError::Closed);
}

#[test]
fn test_open_edit_seeds_fields_and_defaults() {
    let job = Job {
        id: 77,
        title: "Platform Engineer".into(),
        company: "Crab Labs".into(),
        location: "Canada".into(),
        job_type: Some("Contract".into()),
        listing_type: String::new(),
        is_active: false,
        is_featured: true,
        ..Default::default()
    };
    let form = AdminForm::open_edit(&job);

    assert!(form.is_edit());
    assert_eq!(form.record_id(), Some(77));
    assert_eq!(form.kind(), ListingKind::Job);
    assert_eq!(form.field("title"), Some(&json!("Platform Engineer")));
    assert_eq!(form.field("jobType"), Some(&json!("Contract")));
    // Blank type falls back to the default.
    assert_eq!(form.field("type"), Some(&json!("Job")));
    assert_eq!(form.field("isActive"), Some(&json!(false)));
    assert_eq!(form.field("isFeatured"), Some(&json!(true)));
    assert_eq!(form.field("description"), Some(&json!("")));
}

#[test]
fn test_failed_submit_without_message_uses_generic_text() {
    let mut form = filled_event_form();
    form.begin_submit().unwrap();
    let outcome = form.finish_submit(Err(RequestError::Network("connection refused".into())));

    assert_eq!(outcome, FormOutcome::Failed("Failed to save event".into()));
    assert!(form.is_open());
    assert!(!form.is_submitting());
    assert_eq!(form.error(), Some("Failed to save event"));
}

#[tokio::test]
async fn test_server_rejection_keeps_form_open_with_message() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/events")
        .with_status(400)
        .with_body(r#"{"success": false, "message": "Title required"}"#)
        .create_async()
        .await;

    let api = client(&server.url());
    let mut form = filled_event_form();
    let outcome = form.submit(&api).await.unwrap();

    assert_eq!(outcome, FormOutcome::Failed("Title required".into()));
    assert!(form.is_open());
    assert_eq!(form.error(), Some("Title required"));
    assert_eq!(form.field("title"), Some(&json!("RustConf")));
    m.assert_async().await;
}

#[tokio::test]
async fn test_successful_create_closes_form() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/events")
        .match_body(Matcher::PartialJson(json!({
            "title": "RustConf",
            "event_type": "Conference",
            "isActive": true
        })))
        .with_status(201)
        .with_body(r#"{"success": true, "data": {"id": 5, "title": "RustConf"}}"#)
        .create_async()
        .await;

    let api = client(&server.url());
    let mut form = filled_event_form();
    let outcome = form.submit(&api).await.unwrap();

    assert_eq!(outcome, FormOutcome::Saved(json!({"id": 5, "title": "RustConf"})));
    assert!(!form.is_open());
    assert_eq!(form.error(), None);
    m.assert_async().await;
}

#[tokio::test]
async fn test_edit_submits_put_to_record() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("PUT", "/api/events/9")
        .match_body(Matcher::PartialJson(json!({"title": "RustConf 2026"})))
        .with_status(200)
        .with_body(r#"{"data": {"id": 9, "title": "RustConf 2026"}}"#)
        .create_async()
        .await;

    let event = Event {
        id: 9,
        title: "RustConf".into(),
        organizer: "Rust Foundation".into(),
        location: "United States".into(),
        event_type: "Conference".into(),
        ..Default::default()
    };
    let api = client(&server.url());
    let mut form = AdminForm::open_edit(&event);
    form.set_field("title", json!("RustConf 2026")).unwrap();

    assert!(matches!(form.submit(&api).await, Ok(FormOutcome::Saved(_))));
    m.assert_async().await;
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/api/jobs")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server.url());
    let mut form = AdminForm::open_create(ListingKind::Job);
    assert_eq!(form.submit(&api).await, Err(FormError::Invalid(3)));
    m.assert_async().await;
}

#[tokio::test]
async fn test_delete_listing() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("DELETE", "/api/scholarships/4")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;
    let missing = server
        .mock("DELETE", "/api/scholarships/5")
        .with_status(404)
        .with_body(r#"{"message": "Scholarship not found"}"#)
        .create_async()
        .await;

    let api = client(&server.url());
    delete_listing(&api, ListingKind::Scholarship, 4).await.unwrap();
    let err = delete_listing(&api, ListingKind::Scholarship, 5).await.unwrap_err();
    assert_eq!(err.to_string(), "Scholarship not found");

    ok.assert_async().await;
    missing.assert_async().await;
}

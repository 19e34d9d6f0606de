use jobflow::types::errors::*;

// === RequestError Tests ===

#[test]
fn request_error_api_displays_server_message_verbatim() {
    let err = RequestError::Api {
        status: 400,
        message: "Title required".to_string(),
    };
    assert_eq!(err.to_string(), "Title required");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.server_message(), Some("Title required"));
    assert!(!err.is_not_found());
}

#[test]
fn request_error_network_and_decode_display() {
    assert_eq!(
        RequestError::Network("connection refused".to_string()).to_string(),
        "Network error: connection refused"
    );
    assert_eq!(
        RequestError::Decode("expected value".to_string()).to_string(),
        "Failed to decode response: expected value"
    );
}

#[test]
fn request_error_transport_has_no_status_or_server_message() {
    let err = RequestError::Network("timed out".to_string());
    assert_eq!(err.status(), None);
    assert_eq!(err.server_message(), None);
}

#[test]
fn request_error_not_found() {
    let err = RequestError::Api {
        status: 404,
        message: "Route /api/events/9 not found".to_string(),
    };
    assert!(err.is_not_found());
}

#[test]
fn request_error_from_serde_json_is_decode() {
    let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let err: RequestError = json_err.into();
    assert!(matches!(err, RequestError::Decode(_)));
}

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::Database("disk I/O error".to_string()).to_string(),
        "Storage database error: disk I/O error"
    );
    assert_eq!(
        StorageError::Serialization("bad json".to_string()).to_string(),
        "Storage serialization error: bad json"
    );
}

#[test]
fn storage_error_from_rusqlite() {
    let err: StorageError = rusqlite::Error::InvalidQuery.into();
    assert!(matches!(err, StorageError::Database(_)));
}

// === QueryError Tests ===

#[test]
fn query_error_display_variants() {
    assert_eq!(
        QueryError::UnknownFacet {
            kind: "event".to_string(),
            facet: "salary".to_string()
        }
        .to_string(),
        "Unknown filter 'salary' for event listings"
    );
    assert_eq!(
        QueryError::InvalidOption {
            facet: "format".to_string(),
            value: "Hologram".to_string()
        }
        .to_string(),
        "Invalid value 'Hologram' for filter 'format'"
    );
    assert_eq!(QueryError::InvalidPage(0).to_string(), "Invalid page number: 0");
}

// === ViewError Tests ===

#[test]
fn view_error_display_variants() {
    assert_eq!(
        ViewError::PageOutOfRange {
            page: 7,
            total_pages: 4
        }
        .to_string(),
        "Page 7 is out of range (1..=4)"
    );
    assert_eq!(ViewError::NoPagination.to_string(), "No pagination available");
}

#[test]
fn view_error_wraps_query_error_transparently() {
    let err: ViewError = QueryError::InvalidPage(0).into();
    assert_eq!(err.to_string(), "Invalid page number: 0");
}

// === FormError Tests ===

#[test]
fn form_error_display_variants() {
    assert_eq!(FormError::Closed.to_string(), "Form is closed");
    assert_eq!(
        FormError::SubmissionInFlight.to_string(),
        "A submission is already in progress"
    );
    assert_eq!(
        FormError::UnknownField("salary".to_string()).to_string(),
        "Unknown form field: salary"
    );
    assert_eq!(
        FormError::InvalidValue {
            field: "isActive".to_string(),
            expected: "a boolean".to_string()
        }
        .to_string(),
        "Invalid value for field 'isActive': expected a boolean"
    );
    assert_eq!(FormError::Invalid(2).to_string(), "Form has 2 invalid field(s)");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::SerializationError("invalid JSON".to_string()).to_string(),
        "Settings serialization error: invalid JSON"
    );
    assert_eq!(
        SettingsError::InvalidKey("foo.bar".to_string()).to_string(),
        "Invalid settings key: foo.bar"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected bool".to_string()).to_string(),
        "Invalid settings value: expected bool"
    );
}

#[test]
fn errors_implement_error_trait() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(RequestError::Network("x".to_string())),
        Box::new(StorageError::Database("x".to_string())),
        Box::new(QueryError::InvalidPage(0)),
        Box::new(ViewError::NoPagination),
        Box::new(FormError::Closed),
        Box::new(SettingsError::IoError("x".to_string())),
    ];
    for err in &errors {
        assert!(err.source().is_none());
    }
}

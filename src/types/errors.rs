use thiserror::Error;

// === RequestError ===

/// Errors returned by the REST data-access client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// The response body was not the JSON shape the caller expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl RequestError {
    /// HTTP status of an API failure, `None` for transport and decode failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the server, if the backend produced one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RequestError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RequestError::Decode(e.to_string())
        } else {
            RequestError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(e: serde_json::Error) -> Self {
        RequestError::Decode(e.to_string())
    }
}

// === StorageError ===

/// Errors from the persisted key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Storage database error: {0}")]
    Database(String),
    /// A stored value could not be encoded or decoded.
    #[error("Storage serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

// === QueryError ===

/// Errors raised while editing a listing query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The facet is not declared for the listing kind.
    #[error("Unknown filter '{facet}' for {kind} listings")]
    UnknownFacet { kind: String, facet: String },
    /// The value is not one of the facet's options.
    #[error("Invalid value '{value}' for filter '{facet}'")]
    InvalidOption { facet: String, value: String },
    /// Pages are numbered from 1.
    #[error("Invalid page number: {0}")]
    InvalidPage(u32),
}

// === ViewError ===

/// Errors from listing-view navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The requested page lies outside the backend's page range.
    #[error("Page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },
    /// No results have been loaded yet, so there is nothing to page through.
    #[error("No pagination available")]
    NoPagination,
    #[error(transparent)]
    Query(#[from] QueryError),
}

// === FormError ===

/// Errors from the admin listing form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The form is not open.
    #[error("Form is closed")]
    Closed,
    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    /// The field is not part of the listing kind's form.
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    /// The value has the wrong type for the field.
    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidValue { field: String, expected: String },
    /// Local validation failed; nothing was sent.
    #[error("Form has {0} invalid field(s)")]
    Invalid(usize),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

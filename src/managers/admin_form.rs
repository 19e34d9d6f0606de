//! Admin Form for Jobflow.
//!
//! Create/edit form for any listing kind. Each kind has a field template with
//! defaults; edit mode seeds every template field from the record. Submission
//! is split into [`AdminForm::begin_submit`] and [`AdminForm::finish_submit`]
//! so a host that shares the form can keep the in-flight guard while the
//! request runs elsewhere; [`AdminForm::submit`] does both around the call.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::services::api_client::ApiClient;
use crate::services::image_service::is_valid_url;
use crate::types::errors::{FormError, RequestError};
use crate::types::kind::ListingKind;
use crate::types::listing::ListingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Optional absolute URL of any scheme.
    Url,
    /// One option of the kind's facet with this key.
    Choice(&'static str),
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldDefault {
    Text(&'static str),
    Flag(bool),
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    default: FieldDefault,
}

const fn text(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Text,
        required: false,
        default: FieldDefault::Text(""),
    }
}

const fn required(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        required: true,
        ..text(name, label)
    }
}

const fn long_text(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::LongText,
        ..text(name, label)
    }
}

const fn url(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Url,
        ..text(name, label)
    }
}

const fn choice(name: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Choice(name),
        default: FieldDefault::Text(default),
        ..text(name, label)
    }
}

const fn defaulted(name: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        default: FieldDefault::Text(default),
        ..text(name, label)
    }
}

const fn flag(name: &'static str, label: &'static str, default: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Flag,
        required: false,
        default: FieldDefault::Flag(default),
    }
}

const JOB_FIELDS: &[FieldSpec] = &[
    required("title", "Title"),
    required("company", "Company"),
    required("location", "Location"),
    long_text("description", "Description"),
    long_text("requirements", "Requirements"),
    url("link", "Application Link"),
    choice("type", "Type", "Job"),
    choice("jobType", "Job Type", "Full-time"),
    text("category", "Category"),
    text("experience", "Experience"),
    text("salaryRange", "Salary Range"),
    text("published", "Published"),
    text("deadline", "Deadline"),
    flag("isActive", "Active", true),
    flag("isFeatured", "Featured", false),
];

const SCHOLARSHIP_FIELDS: &[FieldSpec] = &[
    required("title", "Title"),
    required("organization", "Organization"),
    required("location", "Location"),
    long_text("description", "Description"),
    long_text("requirements", "Requirements"),
    url("link", "Application Link"),
    url("banner_image", "Banner Image URL"),
    url("logo_image", "Logo Image URL"),
    text("image_alt", "Image Alt Text"),
    choice("degree_level", "Degree Level", "Undergraduate"),
    text("field_of_study", "Field of Study"),
    choice("funding_type", "Funding Type", "Full"),
    text("funding_amount", "Funding Amount"),
    text("deadline", "Deadline"),
    text("duration", "Duration"),
    long_text("eligibility", "Eligibility"),
    long_text("benefits", "Benefits"),
    defaulted("category", "Category", "Education"),
    flag("isActive", "Active", true),
    flag("isFeatured", "Featured", false),
];

const EVENT_FIELDS: &[FieldSpec] = &[
    required("title", "Title"),
    required("organizer", "Organizer"),
    required("location", "Location"),
    long_text("description", "Description"),
    long_text("requirements", "Requirements"),
    url("link", "Registration Link"),
    url("banner_image", "Banner Image URL"),
    url("logo_image", "Logo Image URL"),
    text("image_alt", "Image Alt Text"),
    choice("event_type", "Event Type", "Conference"),
    choice("format", "Format", "In-person"),
    text("duration", "Duration"),
    text("start_date", "Start Date"),
    text("end_date", "End Date"),
    text("deadline", "Deadline"),
    long_text("benefits", "Benefits"),
    long_text("eligibility", "Eligibility"),
    long_text("application_process", "Application Process"),
    defaulted("category", "Category", "Technology"),
    flag("isActive", "Active", true),
    flag("isFeatured", "Featured", false),
];

/// Field template for `kind`, in display order.
pub fn template(kind: ListingKind) -> &'static [FieldSpec] {
    match kind {
        ListingKind::Job => JOB_FIELDS,
        ListingKind::Scholarship => SCHOLARSHIP_FIELDS,
        ListingKind::Event => EVENT_FIELDS,
    }
}

fn field_spec(kind: ListingKind, name: &str) -> Option<&'static FieldSpec> {
    template(kind).iter().find(|f| f.name == name)
}

fn choice_options(kind: ListingKind, facet: &str) -> &'static [&'static str] {
    kind.spec().facet(facet).map(|f| f.options).unwrap_or(&[])
}

/// A field that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Result of a finished submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Saved; the form is closed. Carries the server's copy of the record.
    Saved(Value),
    /// Rejected; the form stays open showing this message.
    Failed(String),
}

/// A create or update request, detached from the form while it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: ListingKind,
    pub record_id: Option<i64>,
    pub payload: Value,
}

impl Submission {
    pub async fn send(&self, client: &ApiClient) -> Result<Value, RequestError> {
        let resource = client.kind(self.kind);
        match self.record_id {
            Some(id) => resource.update(id, &self.payload).await,
            None => resource.create(&self.payload).await,
        }
    }
}

/// Create/edit form state for one listing.
#[derive(Debug, Clone)]
pub struct AdminForm {
    kind: ListingKind,
    record_id: Option<i64>,
    fields: Map<String, Value>,
    open: bool,
    submitting: bool,
    error: Option<String>,
}

impl AdminForm {
    fn with_fields(kind: ListingKind, record_id: Option<i64>, fields: Map<String, Value>) -> Self {
        Self {
            kind,
            record_id,
            fields,
            open: true,
            submitting: false,
            error: None,
        }
    }

    /// Opens an empty form holding the kind's defaults.
    pub fn open_create(kind: ListingKind) -> Self {
        let fields = template(kind)
            .iter()
            .map(|spec| {
                let value = match spec.default {
                    FieldDefault::Text(s) => Value::String(s.to_string()),
                    FieldDefault::Flag(b) => Value::Bool(b),
                };
                (spec.name.to_string(), value)
            })
            .collect();
        Self::with_fields(kind, None, fields)
    }

    /// Opens the form seeded from `record`. Blank or missing values fall back
    /// to the template default.
    pub fn open_edit<T: ListingRecord>(record: &T) -> Self {
        let source = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let fields = template(T::KIND)
            .iter()
            .map(|spec| {
                let value = match (spec.default, source.get(spec.name)) {
                    (FieldDefault::Flag(_), Some(Value::Bool(b))) => Value::Bool(*b),
                    (FieldDefault::Flag(d), _) => Value::Bool(d),
                    (FieldDefault::Text(_), Some(Value::String(s))) if !s.is_empty() => {
                        Value::String(s.clone())
                    }
                    (FieldDefault::Text(d), _) => Value::String(d.to_string()),
                };
                (spec.name.to_string(), value)
            })
            .collect();
        Self::with_fields(T::KIND, Some(record.id()), fields)
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub fn is_edit(&self) -> bool {
        self.record_id.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The body sent on submit.
    pub fn payload(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Sets one field. Unknown names and values of the wrong shape are rejected.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        let spec = field_spec(self.kind, name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        let invalid = |expected: &str| FormError::InvalidValue {
            field: name.to_string(),
            expected: expected.to_string(),
        };

        match (spec.kind, &value) {
            (FieldKind::Flag, Value::Bool(_)) => {}
            (FieldKind::Flag, _) => return Err(invalid("a boolean")),
            (FieldKind::Choice(facet), Value::String(s)) => {
                let options = choice_options(self.kind, facet);
                if !options.iter().any(|o| *o == s.as_str()) {
                    return Err(invalid(&format!("one of {}", options.join(", "))));
                }
            }
            (_, Value::String(_)) => {}
            _ => return Err(invalid("a string")),
        }

        self.fields.insert(spec.name.to_string(), value);
        Ok(())
    }

    /// Current field-level problems; empty when the form may be submitted.
    pub fn validate(&self) -> Vec<FieldError> {
        template(self.kind)
            .iter()
            .filter_map(|spec| {
                let value = self.fields.get(spec.name).and_then(Value::as_str).unwrap_or("");
                if spec.required && value.trim().is_empty() {
                    return Some(FieldError {
                        field: spec.name,
                        message: format!("{} is required", spec.label),
                    });
                }
                if spec.kind == FieldKind::Url && !value.trim().is_empty() && !is_valid_url(value) {
                    return Some(FieldError {
                        field: spec.name,
                        message: format!("{} must be a valid URL", spec.label),
                    });
                }
                None
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Marks the form in flight and returns the request to send.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        if self.submitting {
            return Err(FormError::SubmissionInFlight);
        }
        let problems = self.validate();
        if !problems.is_empty() {
            return Err(FormError::Invalid(problems.len()));
        }

        self.submitting = true;
        self.error = None;
        Ok(Submission {
            kind: self.kind,
            record_id: self.record_id,
            payload: self.payload(),
        })
    }

    /// Applies the server's answer. Success closes the form; failure keeps it
    /// open with the server's message, or a generic one.
    pub fn finish_submit(&mut self, result: Result<Value, RequestError>) -> FormOutcome {
        self.submitting = false;
        match result {
            Ok(saved) => {
                info!(kind = %self.kind, id = ?self.record_id, "Listing saved");
                self.open = false;
                FormOutcome::Saved(saved)
            }
            Err(e) => {
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Failed to save {}", self.kind.spec().display_name));
                warn!(kind = %self.kind, error = %e, "Listing save failed");
                self.error = Some(message.clone());
                FormOutcome::Failed(message)
            }
        }
    }

    pub async fn submit(&mut self, client: &ApiClient) -> Result<FormOutcome, FormError> {
        let submission = self.begin_submit()?;
        let result = submission.send(client).await;
        Ok(self.finish_submit(result))
    }
}

/// Deletes a listing from the dashboard.
pub async fn delete_listing(
    client: &ApiClient,
    kind: ListingKind,
    id: i64,
) -> Result<(), RequestError> {
    client.kind(kind).delete(id).await.map_err(|e| {
        warn!(%kind, id, error = %e, "Listing delete failed");
        e
    })?;
    info!(%kind, id, "Listing deleted");
    Ok(())
}

//! REST data-access client for the Jobflow backend.
//!
//! Single point of contact with the API: prefixes `/api`, attaches the
//! bearer token, unwraps the `{success, message, data}` envelope and turns
//! non-success statuses into [`RequestError::Api`] carrying the server message.
//!
//! Resource groups (`jobs()`, `auth()`, `saved_events()`, ...) are thin
//! borrowed views over the client, built on demand.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::database::LocalStorage;
use crate::types::api::{
    AuthResponse, CompaniesPage, Company, DashboardStats, LoginRequest, RegisterRequest, Stats, User,
};
use crate::types::errors::RequestError;
use crate::types::kind::ListingKind;
use crate::types::listing::{Event, Job, ListPage, ListingRecord, Scholarship};
use crate::types::query::QueryParams;
use crate::types::settings::ApiSettings;

/// Local storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "jobflow_token";

const API_PREFIX: &str = "/api";

/// Prefixes `/api` unless the endpoint already carries it.
pub fn api_path(endpoint: &str) -> String {
    let endpoint = if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{}", endpoint)
    };
    if endpoint.starts_with("/api/") {
        endpoint
    } else {
        format!("{}{}", API_PREFIX, endpoint)
    }
}

/// Returns `body.data` when present and non-null, otherwise the whole body.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Extracts a non-empty `message` from an error body, if it is JSON.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// HTTP client for the listing backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn LocalStorage>,
    token: Mutex<Option<Zeroizing<String>>>,
}

impl ApiClient {
    /// Creates a client for `base_url`, reading any persisted token once.
    pub fn new(base_url: &str, storage: Arc<dyn LocalStorage>) -> Self {
        let token = match storage.get_item(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(Zeroizing::new),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                None
            }
        };

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            storage,
            token: Mutex::new(token),
        }
    }

    /// Creates a client from settings, honouring the base-URL environment override.
    pub fn from_settings(settings: &ApiSettings, storage: Arc<dyn LocalStorage>) -> Self {
        Self::new(&settings.effective_base_url(), storage)
    }

    /// Replaces the underlying `reqwest::Client` (timeouts, proxies, TLS).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, api_path(endpoint))
    }

    fn token_slot(&self) -> MutexGuard<'_, Option<Zeroizing<String>>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Caches and persists `token`.
    pub fn set_token(&self, token: &str) {
        *self.token_slot() = Some(Zeroizing::new(token.to_string()));
        if let Err(e) = self.storage.set_item(TOKEN_STORAGE_KEY, token) {
            warn!(error = %e, "Failed to persist token");
        }
    }

    /// Drops the cached token and its persisted copy.
    pub fn clear_token(&self) {
        *self.token_slot() = None;
        if let Err(e) = self.storage.remove_item(TOKEN_STORAGE_KEY) {
            warn!(error = %e, "Failed to remove persisted token");
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token_slot().as_ref().map(|t| t.to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_slot().is_some()
    }

    /// Issues a request and returns the unwrapped payload.
    ///
    /// Empty success bodies yield `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let path = api_path(endpoint);
        let url = format!("{}{}", self.base_url, path);
        let token = self.token_slot().clone();

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token.as_ref() {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, %path, "Sending API request");
        let response = builder.send().await.map_err(|e| {
            warn!(%method, %path, error = %e, "API request failed");
            RequestError::from(e)
        })?;

        let status = response.status();

        if !status.is_success() {
            // An unreadable error body still yields the status and the route message.
            let text = response.text().await.unwrap_or_else(|e| {
                debug!(%method, %path, error = %e, "Unreadable error body");
                String::new()
            });
            let message =
                error_message(&text).unwrap_or_else(|| format!("Route {} not found", path));
            warn!(%method, %path, status = status.as_u16(), %message, "API returned an error");
            return Err(RequestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let body: Value = serde_json::from_str(&text)?;
        Ok(unwrap_envelope(body))
    }

    /// [`request`](Self::request) decoded into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<T, RequestError> {
        let value = self.request(method, endpoint, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Untyped operations on the collection of `kind`.
    pub fn kind(&self, kind: ListingKind) -> KindResource<'_> {
        KindResource { client: self, kind }
    }

    /// Typed operations on the collection of `T`.
    pub fn listings<T: ListingRecord>(&self) -> ListingResource<'_, T> {
        ListingResource {
            raw: self.kind(T::KIND),
            _marker: PhantomData,
        }
    }

    pub fn jobs(&self) -> ListingResource<'_, Job> {
        self.listings()
    }

    pub fn scholarships(&self) -> ListingResource<'_, Scholarship> {
        self.listings()
    }

    pub fn events(&self) -> ListingResource<'_, Event> {
        self.listings()
    }

    pub fn companies(&self) -> CompaniesResource<'_> {
        CompaniesResource { client: self }
    }

    pub fn users(&self) -> UsersResource<'_> {
        UsersResource { client: self }
    }

    pub fn auth(&self) -> AuthResource<'_> {
        AuthResource { client: self }
    }

    /// Server-side saved relation for `kind`.
    pub fn saved(&self, kind: ListingKind) -> SavedResource<'_> {
        SavedResource { client: self, kind }
    }

    pub fn saved_jobs(&self) -> SavedResource<'_> {
        self.saved(ListingKind::Job)
    }

    pub fn saved_scholarships(&self) -> SavedResource<'_> {
        self.saved(ListingKind::Scholarship)
    }

    pub fn saved_events(&self) -> SavedResource<'_> {
        self.saved(ListingKind::Event)
    }

    pub fn stats(&self) -> StatsResource<'_> {
        StatsResource { client: self }
    }
}

fn to_body<D: Serialize + ?Sized>(data: &D) -> Result<Value, RequestError> {
    Ok(serde_json::to_value(data)?)
}

// ─── Listings ───

/// Listing collection operations returning raw JSON payloads.
pub struct KindResource<'a> {
    client: &'a ApiClient,
    kind: ListingKind,
}

impl KindResource<'_> {
    fn path(&self) -> &'static str {
        self.kind.spec().resource
    }

    pub async fn list(&self, params: &QueryParams) -> Result<Value, RequestError> {
        let endpoint = params.apply_to(self.path());
        self.client.request(Method::GET, &endpoint, None).await
    }

    pub async fn get(&self, id: i64) -> Result<Value, RequestError> {
        let endpoint = format!("{}/{}", self.path(), id);
        self.client.request(Method::GET, &endpoint, None).await
    }

    pub async fn create(&self, data: &Value) -> Result<Value, RequestError> {
        self.client.request(Method::POST, self.path(), Some(data)).await
    }

    /// Posts `{<collection>: items}` to the bulk endpoint.
    pub async fn bulk_create(&self, items: Vec<Value>) -> Result<Value, RequestError> {
        let mut body = Map::new();
        body.insert(self.kind.spec().collection_key.to_string(), Value::Array(items));
        let endpoint = format!("{}/bulk", self.path());
        self.client
            .request(Method::POST, &endpoint, Some(&Value::Object(body)))
            .await
    }

    pub async fn update(&self, id: i64, data: &Value) -> Result<Value, RequestError> {
        let endpoint = format!("{}/{}", self.path(), id);
        self.client.request(Method::PUT, &endpoint, Some(data)).await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, RequestError> {
        let endpoint = format!("{}/{}", self.path(), id);
        self.client.request(Method::DELETE, &endpoint, None).await
    }
}

/// Listing collection operations decoded into `T`.
pub struct ListingResource<'a, T> {
    raw: KindResource<'a>,
    _marker: PhantomData<T>,
}

impl<T: ListingRecord> ListingResource<'_, T> {
    pub async fn list(&self, params: &QueryParams) -> Result<ListPage<T>, RequestError> {
        let data = self.raw.list(params).await?;
        ListPage::from_data(data)
    }

    pub async fn get(&self, id: i64) -> Result<T, RequestError> {
        let data = self.raw.get(id).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn create<D: Serialize + ?Sized>(&self, data: &D) -> Result<T, RequestError> {
        let created = self.raw.create(&to_body(data)?).await?;
        Ok(serde_json::from_value(created)?)
    }

    pub async fn bulk_create<D: Serialize>(&self, items: &[D]) -> Result<Vec<T>, RequestError> {
        let items = items.iter().map(to_body).collect::<Result<Vec<_>, _>>()?;
        let created = self.raw.bulk_create(items).await?;
        Ok(ListPage::<T>::from_data(created)?.items)
    }

    pub async fn update<D: Serialize + ?Sized>(&self, id: i64, data: &D) -> Result<T, RequestError> {
        let updated = self.raw.update(id, &to_body(data)?).await?;
        Ok(serde_json::from_value(updated)?)
    }

    pub async fn delete(&self, id: i64) -> Result<Value, RequestError> {
        self.raw.delete(id).await
    }
}

impl ListingResource<'_, Job> {
    /// Board statistics (same payload as `stats().get()`).
    pub async fn stats(&self) -> Result<Stats, RequestError> {
        self.raw.client.stats().get().await
    }
}

// ─── Companies ───

pub struct CompaniesResource<'a> {
    client: &'a ApiClient,
}

impl CompaniesResource<'_> {
    pub async fn list(&self, params: &QueryParams) -> Result<CompaniesPage, RequestError> {
        let endpoint = params.apply_to("/companies");
        self.client.request_as(Method::GET, &endpoint, None).await
    }

    pub async fn get(&self, id: i64) -> Result<Company, RequestError> {
        self.client
            .request_as(Method::GET, &format!("/companies/{}", id), None)
            .await
    }

    pub async fn top_featured(&self, limit: Option<u32>) -> Result<Value, RequestError> {
        let mut params = QueryParams::new();
        params.push_opt("limit", limit.filter(|l| *l > 0));
        let endpoint = params.apply_to("/companies/top/featured");
        self.client.request(Method::GET, &endpoint, None).await
    }
}

// ─── Users ───

pub struct UsersResource<'a> {
    client: &'a ApiClient,
}

impl UsersResource<'_> {
    pub async fn profile(&self) -> Result<User, RequestError> {
        self.client.request_as(Method::GET, "/users/profile", None).await
    }

    pub async fn update_profile(&self, data: &Value) -> Result<User, RequestError> {
        self.client
            .request_as(Method::PUT, "/users/profile", Some(data))
            .await
    }

    pub async fn list(&self, params: &QueryParams) -> Result<Value, RequestError> {
        let endpoint = params.apply_to("/users");
        self.client.request(Method::GET, &endpoint, None).await
    }

    pub async fn get(&self, id: i64) -> Result<User, RequestError> {
        self.client
            .request_as(Method::GET, &format!("/users/{}", id), None)
            .await
    }
}

// ─── Auth ───

pub struct AuthResource<'a> {
    client: &'a ApiClient,
}

impl AuthResource<'_> {
    async fn authenticate(&self, endpoint: &str, body: Value) -> Result<AuthResponse, RequestError> {
        let response: AuthResponse = self
            .client
            .request_as(Method::POST, endpoint, Some(&body))
            .await?;
        if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            self.client.set_token(token);
        }
        Ok(response)
    }

    /// Logs in and stores the returned token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, RequestError> {
        self.authenticate("/auth/login", to_body(&LoginRequest { email, password })?)
            .await
    }

    /// Registers and stores the returned token.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, RequestError> {
        self.authenticate(
            "/auth/register",
            to_body(&RegisterRequest {
                name,
                email,
                password,
            })?,
        )
        .await
    }

    pub async fn me(&self) -> Result<User, RequestError> {
        self.client.request_as(Method::GET, "/auth/me", None).await
    }

    /// Notifies the backend, then clears the token whatever the outcome.
    pub async fn logout(&self) -> Result<(), RequestError> {
        let result = self.client.request(Method::POST, "/auth/logout", None).await;
        self.client.clear_token();
        result.map(|_| ())
    }
}

// ─── Saved relations ───

/// Server-side saved-listing relation (`/saved-jobs`, `/saved-scholarships`, `/saved-events`).
pub struct SavedResource<'a> {
    client: &'a ApiClient,
    kind: ListingKind,
}

impl SavedResource<'_> {
    fn path(&self) -> &'static str {
        self.kind.spec().saved_resource
    }

    fn relation_body(&self, item_id: i64, user_id: i64) -> Value {
        let mut body = Map::new();
        body.insert(self.kind.spec().saved_id_field.to_string(), json!(item_id));
        body.insert("userId".to_string(), json!(user_id));
        Value::Object(body)
    }

    pub async fn list(&self, user_id: i64) -> Result<Value, RequestError> {
        let endpoint = format!("{}/{}", self.path(), user_id);
        self.client.request(Method::GET, &endpoint, None).await
    }

    pub async fn save(&self, item_id: i64, user_id: i64) -> Result<Value, RequestError> {
        let body = self.relation_body(item_id, user_id);
        self.client.request(Method::POST, self.path(), Some(&body)).await
    }

    pub async fn unsave(&self, item_id: i64, user_id: i64) -> Result<Value, RequestError> {
        let body = self.relation_body(item_id, user_id);
        self.client
            .request(Method::DELETE, self.path(), Some(&body))
            .await
    }

    pub async fn remove(&self, item_id: i64) -> Result<Value, RequestError> {
        let endpoint = format!("{}/{}", self.path(), item_id);
        self.client.request(Method::DELETE, &endpoint, None).await
    }

    pub async fn check(&self, item_id: i64) -> Result<Value, RequestError> {
        let endpoint = format!("{}/check/{}", self.path(), item_id);
        self.client.request(Method::GET, &endpoint, None).await
    }
}

// ─── Stats ───

pub struct StatsResource<'a> {
    client: &'a ApiClient,
}

impl StatsResource<'_> {
    pub async fn get(&self) -> Result<Stats, RequestError> {
        self.client.request_as(Method::GET, "/stats", None).await
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, RequestError> {
        self.client
            .request_as(Method::GET, "/stats/dashboard", None)
            .await
    }
}

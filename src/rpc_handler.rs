//! RPC method handler for the Jobflow JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the managers and services
//! held by [`App`].

use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::admin_form::{delete_listing, AdminForm, FormOutcome};
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::managers::listing_view::{ListingSource, ListingView};
use crate::managers::saved_items::SavedItems;
use crate::services::query_builder::QueryState;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::errors::FormError;
use crate::types::kind::ListingKind;
use crate::types::listing::{Event, Job, ListingRecord, Scholarship};

fn to_json<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    str_param(params, key).ok_or_else(|| format!("missing {}", key))
}

fn id_param(params: &Value, key: &str) -> Result<i64, String> {
    params
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| format!("missing {}", key))
}

fn kind_param(params: &Value) -> Result<ListingKind, String> {
    required_str(params, "kind")?.parse()
}

fn u32_param(params: &Value, key: &str) -> Result<Option<u32>, String> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| format!("invalid {}", key)),
    }
}

/// Builds a query from `{search, facets: {key: value}, featured_only, page, limit}`.
///
/// The page is applied last since every filter change resets it.
pub fn query_from_params(
    kind: ListingKind,
    params: &Value,
    default_limit: u32,
) -> Result<QueryState, String> {
    let limit = u32_param(params, "limit")?.unwrap_or(default_limit);
    let mut query = QueryState::with_limit(kind, limit);

    if let Some(search) = str_param(params, "search") {
        query.set_search(search);
    }
    if let Some(facets) = params.get("facets").and_then(Value::as_object) {
        for (key, value) in facets {
            let value = value.as_str().unwrap_or("");
            query.set_facet(key, value).map_err(|e| e.to_string())?;
        }
    }
    if let Some(featured) = params.get("featured_only").and_then(Value::as_bool) {
        query.set_featured_only(featured);
    }
    if let Some(page) = u32_param(params, "page")? {
        query.set_page(page).map_err(|e| e.to_string())?;
    }
    Ok(query)
}

async fn list_rendered<T: ListingRecord>(app: &App, query: QueryState) -> Result<Value, String> {
    let mut view = ListingView::<T>::from_query(query);
    let ticket = view.begin_fetch();
    let result = ListingSource::<T>::fetch_page(app.api.as_ref(), &ticket.params).await;
    view.complete(&ticket, result);
    to_json(&view.render(&app.bookmarks))
}

fn outcome_json(outcome: FormOutcome) -> Value {
    match outcome {
        FormOutcome::Saved(record) => json!({"saved": true, "record": record}),
        FormOutcome::Failed(message) => json!({"saved": false, "error": message}),
    }
}

async fn submit_form(app: &App, mut form: AdminForm, data: &Value) -> Result<Value, String> {
    if let Some(fields) = data.as_object() {
        for (name, value) in fields {
            form.set_field(name, value.clone()).map_err(|e| e.to_string())?;
        }
    }

    match form.submit(&app.api).await {
        Ok(outcome) => Ok(outcome_json(outcome)),
        Err(FormError::Invalid(_)) => Ok(json!({"saved": false, "errors": form.validate()})),
        Err(e) => Err(e.to_string()),
    }
}

async fn edit_listing<T: ListingRecord>(app: &App, id: i64, data: &Value) -> Result<Value, String> {
    let record: T = app.api.listings::<T>().get(id).await.map_err(|e| e.to_string())?;
    submit_form(app, AdminForm::open_edit(&record), data).await
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),

        // ─── Bookmarks ───
        "bookmark.toggle" => {
            let kind = kind_param(params)?;
            let id = id_param(params, "id")?;
            let bookmarked = app.bookmarks.toggle_bookmark(kind, id);
            Ok(json!({"kind": kind, "id": id, "bookmarked": bookmarked}))
        }
        "bookmark.check" => {
            let kind = kind_param(params)?;
            let id = id_param(params, "id")?;
            Ok(json!({"kind": kind, "id": id, "bookmarked": app.bookmarks.is_bookmarked(kind, id)}))
        }
        "bookmark.list" => {
            let kind = kind_param(params)?;
            Ok(json!(app.bookmarks.bookmarked_ids(kind)))
        }
        "bookmark.prune" => {
            let kind = kind_param(params)?;
            let live: Vec<i64> = params
                .get("live_ids")
                .and_then(Value::as_array)
                .ok_or("missing live_ids")?
                .iter()
                .filter_map(Value::as_i64)
                .collect();
            Ok(json!({"removed": app.bookmarks.prune(kind, &live)}))
        }

        // ─── Queries and listings ───
        "query.build" => {
            let kind = kind_param(params)?;
            let query = query_from_params(kind, params, app.page_size())?;
            let query_params = query.to_params();
            Ok(json!({
                "params": query_params.to_json(),
                "query_string": query_params.to_query_string(),
                "has_active_filters": query.has_active_filters(),
            }))
        }
        "listing.list" => {
            let kind = kind_param(params)?;
            let query = query_from_params(kind, params, app.page_size())?;
            match kind {
                ListingKind::Job => list_rendered::<Job>(app, query).await,
                ListingKind::Scholarship => list_rendered::<Scholarship>(app, query).await,
                ListingKind::Event => list_rendered::<Event>(app, query).await,
            }
        }
        "listing.get" => {
            let kind = kind_param(params)?;
            let id = id_param(params, "id")?;
            app.api.kind(kind).get(id).await.map_err(|e| e.to_string())
        }
        "listing.create" => {
            let kind = kind_param(params)?;
            let data = params.get("data").cloned().unwrap_or_else(|| json!({}));
            submit_form(app, AdminForm::open_create(kind), &data).await
        }
        "listing.update" => {
            let kind = kind_param(params)?;
            let id = id_param(params, "id")?;
            let data = params.get("data").cloned().unwrap_or_else(|| json!({}));
            match kind {
                ListingKind::Job => edit_listing::<Job>(app, id, &data).await,
                ListingKind::Scholarship => edit_listing::<Scholarship>(app, id, &data).await,
                ListingKind::Event => edit_listing::<Event>(app, id, &data).await,
            }
        }
        "listing.delete" => {
            let kind = kind_param(params)?;
            let id = id_param(params, "id")?;
            delete_listing(&app.api, kind, id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Auth ───
        "auth.login" => {
            let email = required_str(params, "email")?;
            let password = required_str(params, "password")?;
            let response = app
                .api
                .auth()
                .login(email, password)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"authenticated": app.api.is_authenticated(), "user": response.user}))
        }
        "auth.register" => {
            let name = required_str(params, "name")?;
            let email = required_str(params, "email")?;
            let password = required_str(params, "password")?;
            let response = app
                .api
                .auth()
                .register(name, email, password)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"authenticated": app.api.is_authenticated(), "user": response.user}))
        }
        "auth.me" => {
            let user = app.api.auth().me().await.map_err(|e| e.to_string())?;
            to_json(&user)
        }
        "auth.logout" => {
            app.api.auth().logout().await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "auth.token" => Ok(json!({"authenticated": app.api.is_authenticated()})),

        // ─── Stats ───
        "stats.get" => {
            let stats = app.api.stats().get().await.map_err(|e| e.to_string())?;
            to_json(&stats)
        }
        "stats.dashboard" => {
            let stats = app.api.stats().dashboard().await.map_err(|e| e.to_string())?;
            to_json(&stats)
        }

        // ─── Saved items ───
        "saved.load" => {
            let saved = SavedItems::load(&app.api, &app.bookmarks).await;
            let pruned = if params.get("prune").and_then(Value::as_bool).unwrap_or(false) {
                saved.prune(&app.bookmarks)
            } else {
                0
            };
            let mut result = to_json(&saved)?;
            if let Some(map) = result.as_object_mut() {
                map.insert("total".to_string(), json!(saved.total()));
                map.insert("pruned".to_string(), json!(pruned));
            }
            Ok(result)
        }

        // ─── Settings ───
        "settings.get" => {
            let engine = app.settings();
            match str_param(params, "key") {
                Some(key) => engine.get_value(key).map_err(|e| e.to_string()),
                None => to_json(engine.get_settings()),
            }
        }
        "settings.set" => {
            let key = required_str(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings()
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

//! Request handlers.
//!
//! Each handler is a thin adapter: extract, call the service on
//! [`AppState`], map the outcome to JSON.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::ApiResult;
use crate::data::{sample_chart, ChartData, DEFAULT_SAMPLE_POINTS};
use crate::directory::{UserPatch, UserRecord};
use crate::forms::{AppSettings, CredentialsForm, FileUpload};
use crate::health::{HealthSnapshot, Liveness};
use crate::http::{AppState, HttpError};
use crate::util::{
    format_timestamp, safe_get, sanitize_value, validate_email_value, ValidationError,
    DEFAULT_MAX_INPUT_LENGTH,
};

const MAX_CHART_POINTS: usize = 1000;

type HandlerResult<T> = Result<Json<T>, HttpError>;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

pub async fn health(State(state): State<AppState>) -> Json<Liveness> {
    Json(state.health.liveness())
}

pub async fn health_details(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(state.health.snapshot())
}

pub async fn health_dependencies(State(state): State<AppState>) -> Json<BTreeMap<String, bool>> {
    Json(state.health.check_dependencies().await)
}

pub async fn health_report(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(state.health.report().await)
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserRecord>> {
    let mut users = state.directory.list();
    users.sort_by(|a, b| a.email.cmp(&b.email));
    Json(users)
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserRecord>), HttpError> {
    let record = state.directory.create(&body.name, &body.email)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> HandlerResult<UserRecord> {
    state
        .directory
        .get(&email)
        .map(Json)
        .ok_or_else(|| HttpError::not_found(format!("user {}", email)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(patch): Json<UserPatch>,
) -> HandlerResult<UserRecord> {
    if patch.is_empty() {
        return Err(ValidationError::Invalid {
            field: "patch",
            reason: "no fields to update".to_string(),
        }
        .into());
    }

    state
        .directory
        .update(&email, &patch)?
        .map(Json)
        .ok_or_else(|| HttpError::not_found(format!("user {}", email)))
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CachePut {
    pub value: Value,
    pub ttl_secs: Option<u64>,
}

pub async fn cache_get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> HandlerResult<Value> {
    state
        .cache
        .get(&key)
        .map(|value| Json(json!({ "key": key, "value": value })))
        .ok_or_else(|| HttpError::not_found(format!("cache key {}", key)))
}

pub async fn cache_put(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(body): Json<CachePut>,
) -> StatusCode {
    let ttl = body
        .ttl_secs
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| state.default_ttl());
    state.cache.set(key, body.value, ttl);
    StatusCode::NO_CONTENT
}

pub async fn cache_delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, HttpError> {
    state
        .cache
        .remove(&key)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| HttpError::not_found(format!("cache key {}", key)))
}

// ---------------------------------------------------------------------------
// Data and text
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub count: Option<usize>,
}

pub async fn chart(Query(query): Query<ChartQuery>) -> HandlerResult<ChartData> {
    let count = query
        .count
        .unwrap_or(DEFAULT_SAMPLE_POINTS)
        .min(MAX_CHART_POINTS);
    Ok(Json(sample_chart(count)?))
}

/// Echo a sanitized greeting. Missing or non-string names become "guest".
pub async fn greet(Json(body): Json<Value>) -> Json<Value> {
    let raw = safe_get(&body, "name", Value::String("guest".into()));
    let mut name = sanitize_value(&raw, DEFAULT_MAX_INPUT_LENGTH);
    if name.is_empty() {
        name = "guest".into();
    }

    Json(json!({
        "greeting": format!("Hello, {}!", name),
        "at": format_timestamp(None),
    }))
}

// ---------------------------------------------------------------------------
// External API
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub url: String,
}

pub async fn connection_test(State(state): State<AppState>) -> HandlerResult<ApiResult> {
    let mut service = state.api_service();
    let session = service.open()?;
    let result = session.test_connection().await?;
    Ok(Json(result))
}

pub async fn fetch(
    State(state): State<AppState>,
    Json(body): Json<FetchRequest>,
) -> HandlerResult<ApiResult> {
    let mut service = state.api_service();
    let session = service.open()?;
    let result = session.fetch(&body.url).await?;
    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// Forms and settings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EmailCheck {
    #[serde(default)]
    pub email: Value,
}

pub async fn submit_credentials(Json(form): Json<CredentialsForm>) -> HandlerResult<Value> {
    form.validate()?;
    tracing::info!(email = %form.email, "Credentials accepted");
    Ok(Json(json!({ "accepted": true, "email": form.email })))
}

pub async fn submit_upload(Json(upload): Json<FileUpload>) -> HandlerResult<Value> {
    upload.validate()?;
    tracing::info!(filename = %upload.filename, size = upload.size, "Upload accepted");
    Ok(Json(json!({
        "accepted": true,
        "filename": upload.filename,
        "size": upload.size,
    })))
}

pub async fn check_email(Json(body): Json<EmailCheck>) -> Json<Value> {
    Json(json!({ "valid": validate_email_value(&body.email) }))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<AppSettings> {
    Json(state.settings.read().await.clone())
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<AppSettings>,
) -> HandlerResult<AppSettings> {
    settings.validate()?;
    *state.settings.write().await = settings.clone();
    tracing::info!(theme = %settings.theme, language = %settings.language, "Settings saved");
    Ok(Json(settings))
}

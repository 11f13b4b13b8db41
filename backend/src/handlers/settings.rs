//! HTTP handlers for settings endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::settings::{Setting, SettingsService};
use crate::AppState;

/// List all setting blobs
pub async fn list_settings(State(state): State<AppState>) -> AppResult<Json<Vec<Setting>>> {
    let service = SettingsService::new(state.db);
    let settings = service.list().await?;
    Ok(Json(settings))
}

/// Get one setting blob
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Setting>> {
    let service = SettingsService::new(state.db);
    let setting = service.get(&key).await?;
    Ok(Json(setting))
}

/// Store one setting blob
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> AppResult<Json<Setting>> {
    let service = SettingsService::new(state.db);
    let setting = service.put(&key, value).await?;
    Ok(Json(setting))
}

/// Delete one setting blob
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<()>> {
    let service = SettingsService::new(state.db);
    service.delete(&key).await?;
    Ok(Json(()))
}

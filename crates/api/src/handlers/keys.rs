//! Handlers for the stored-credential endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use runlens_core::types::TelegramId;
use runlens_db::repositories::StoredKeyRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct KeysQuery {
    pub telegram_id: TelegramId,
}

#[derive(Debug, Serialize)]
pub struct KeyEntry {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<KeyEntry>,
}

/// GET /get_keys?telegram_id=<id>
pub async fn get_keys(
    State(state): State<AppState>,
    Query(params): Query<KeysQuery>,
) -> AppResult<Json<KeysResponse>> {
    let rows = StoredKeyRepo::list_for_owner(&state.pool, params.telegram_id).await?;

    let keys = rows
        .into_iter()
        .map(|row| KeyEntry {
            key: row.api_key,
            name: row.username,
        })
        .collect();

    Ok(Json(KeysResponse { keys }))
}

#[derive(Debug, Deserialize)]
pub struct AddKeyRequest {
    pub telegram_id: TelegramId,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct AddKeyResponse {
    pub username: String,
}

/// POST /add_key
///
/// Verifies the key resolves to a real identity before storing it. The
/// pre-check gives the common duplicate a clean 409; the unique
/// constraint behind [`StoredKeyRepo::insert`] catches the race where
/// two identical requests pass the check together.
pub async fn add_key(
    State(state): State<AppState>,
    Json(input): Json<AddKeyRequest>,
) -> AppResult<Json<AddKeyResponse>> {
    if input.api_key.is_empty() {
        return Err(AppError::EmptyApiKey);
    }

    if StoredKeyRepo::exists(&state.pool, input.telegram_id, &input.api_key).await? {
        return Err(AppError::DuplicateKey);
    }

    let viewer = state.tracker.viewer(&input.api_key).await?;

    let inserted = StoredKeyRepo::insert(
        &state.pool,
        input.telegram_id,
        &input.api_key,
        &viewer.username,
    )
    .await?;
    if inserted.is_none() {
        return Err(AppError::DuplicateKey);
    }

    tracing::info!(
        telegram_id = input.telegram_id,
        username = %viewer.username,
        "Stored tracking-service key",
    );

    Ok(Json(AddKeyResponse {
        username: viewer.username,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteKeyRequest {
    pub telegram_id: TelegramId,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteKeyResponse {
    pub message: String,
}

/// POST /delete_key
pub async fn delete_key(
    State(state): State<AppState>,
    Json(input): Json<DeleteKeyRequest>,
) -> AppResult<Json<DeleteKeyResponse>> {
    if input.api_key.is_empty() {
        return Err(AppError::ApiKeyRequired);
    }

    let username = StoredKeyRepo::delete(&state.pool, input.telegram_id, &input.api_key)
        .await?
        .ok_or(AppError::KeyNotFound)?;

    tracing::info!(
        telegram_id = input.telegram_id,
        username = %username,
        "Deleted tracking-service key",
    );

    Ok(Json(DeleteKeyResponse {
        message: format!("API ключ {} удален", input.api_key),
    }))
}

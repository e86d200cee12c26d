use crate::error::ApiError;
use crate::schemas::Credentials;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// `POST /api/credentials`: replace the stored record.
pub async fn save_credentials_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(creds) = payload.map_err(|e| {
        warn!("Rejected credentials body: {}", e);
        ApiError::from(e)
    })?;

    state.store.save(&creds).await.map_err(|e| {
        error!("Failed to save credentials: {}", e);
        ApiError::SaveCredentials(e)
    })?;

    Ok(Json(json!({ "status": "saved" })))
}

/// `GET /api/credentials`: the stored record, or 404 when none was saved.
pub async fn fetch_credentials_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Credentials>, ApiError> {
    match state.store.read_if_present().await {
        Ok(Some(creds)) => Ok(Json(creds)),
        Ok(None) => {
            debug!("No credentials saved yet");
            Err(ApiError::NotFound)
        }
        Err(e) => {
            error!("Failed to read credentials: {}", e);
            Err(ApiError::ReadCredentials(e))
        }
    }
}

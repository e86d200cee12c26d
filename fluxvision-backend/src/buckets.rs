use crate::error::ApiError;
use crate::schemas::Bucket;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{debug, error};

/// `GET /api/buckets`: buckets visible to the stored credentials, in
/// upstream order.
pub async fn list_buckets_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Bucket>>, ApiError> {
    let creds = state.store.resolve().await?;

    let result = match state.influx(&creds) {
        Ok(client) => client.list_buckets().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(buckets) => {
            debug!("Returning {} bucket(s)", buckets.len());
            Ok(Json(buckets))
        }
        Err(e) => {
            error!(url = %creds.url, "Failed to list buckets: {}", e);
            Err(ApiError::Upstream(format!("Failed to list buckets: {}", e)))
        }
    }
}

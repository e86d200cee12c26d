pub use crate::buckets::list_buckets_handler;
pub use crate::credentials::{fetch_credentials_handler, save_credentials_handler};
pub use crate::influx_check::check_influx_handler;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub async fn health_handler() -> impl IntoResponse {
    // Liveness only; does not touch the credentials file or InfluxDB.
    Json(json!({ "status": "ok" }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_request_body_bytes;
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/credentials",
            get(fetch_credentials_handler).post(save_credentials_handler),
        )
        .route("/api/influx/check", get(check_influx_handler))
        .route("/api/buckets", get(list_buckets_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

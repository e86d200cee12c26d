use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// `GET /api/influx/check`: ping InfluxDB with the stored credentials.
pub async fn check_influx_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let creds = state.store.resolve().await?;
    debug!(url = %creds.url, org = %creds.org, "Checking InfluxDB connectivity");

    let ping = match state.influx(&creds) {
        Ok(client) => client.ping().await,
        Err(e) => Err(e),
    };
    let reachable = ping.map_err(|e| {
        let (prefix, len) = creds.token_hint();
        warn!(url = %creds.url, org = %creds.org, "InfluxDB unreachable: {}", e);
        ApiError::Upstream(format!(
            "Failed to reach InfluxDB (url={}, org={}, token_prefix={}…, token_len={}): {}",
            creds.url, creds.org, prefix, len, e
        ))
    })?;

    if !reachable {
        warn!(url = %creds.url, org = %creds.org, "InfluxDB ping failed");
        return Err(ApiError::Upstream(format!(
            "InfluxDB ping failed (url={}, org={})",
            creds.url, creds.org
        )));
    }

    info!(url = %creds.url, "InfluxDB reachable");
    Ok(Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{closed_port_url, spawn_mock_influx};
    use crate::proxy::tests::{call, test_app};
    use crate::schemas::Credentials;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    const TOKEN: &str = "0123456789abcdefSECRET";

    async fn save(app: &axum::Router, url: &str) {
        let body = json!({ "url": url, "org": "acme", "token": TOKEN });
        let (status, _) = call(app, Method::POST, "/api/credentials", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn not_configured_is_400() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, _) = test_app(dir.path());
        let (status, body) = call(&app, Method::GET, "/api/influx/check", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "InfluxDB credentials not configured yet");
    }

    #[tokio::test]
    async fn healthy_ping_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, _) = test_app(dir.path());
        save(&app, &spawn_mock_influx(204, 200, json!({})).await).await;

        let (status, body) = call(&app, Method::GET, "/api/influx/check", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn unhealthy_ping_is_503_with_ping_message() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, _) = test_app(dir.path());
        let url = spawn_mock_influx(503, 200, json!({})).await;
        save(&app, &url).await;

        let (status, body) = call(&app, Method::GET, "/api/influx/check", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let detail = body["detail"].as_str().expect("detail");
        assert_eq!(
            detail,
            format!("InfluxDB ping failed (url={}, org=acme)", url)
        );
    }

    #[tokio::test]
    async fn unreachable_is_503_with_redacted_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, _) = test_app(dir.path());
        let url = closed_port_url();
        save(&app, &url).await;

        let (status, body) = call(&app, Method::GET, "/api/influx/check", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let detail = body["detail"].as_str().expect("detail");
        assert!(detail.starts_with("Failed to reach InfluxDB ("), "{}", detail);
        assert!(detail.contains(&format!("url={}", url)), "{}", detail);
        assert!(detail.contains("token_prefix=012345…"), "{}", detail);
        assert!(detail.contains("token_len=22"), "{}", detail);
        assert!(!detail.contains(TOKEN), "full token leaked: {}", detail);
    }

    #[tokio::test]
    async fn invalid_url_is_503_not_500() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, state) = test_app(dir.path());
        let creds = Credentials {
            url: "not a url".to_string(),
            org: "acme".to_string(),
            token: TOKEN.to_string(),
        };
        state.store.save(&creds).await.expect("save");

        let (status, body) = call(&app, Method::GET, "/api/influx/check", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body["detail"].as_str().expect("detail").contains(TOKEN));
    }

    #[tokio::test]
    async fn malformed_credentials_file_is_500() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, state) = test_app(dir.path());
        std::fs::write(state.store.path(), "[]").expect("write");

        let (status, _) = call(&app, Method::GET, "/api/influx/check", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

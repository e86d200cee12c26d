use crate::schemas::{Bucket, Credentials};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid InfluxDB URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("({status}) {body}")]
    Status { status: StatusCode, body: String },
}

/// Body of `GET /api/v2/buckets`; `buckets` may be null.
#[derive(Deserialize)]
struct BucketsResponse {
    #[serde(default)]
    buckets: Option<Vec<Bucket>>,
}

/// Handle bound to one set of credentials, built per request and released
/// when dropped.
pub struct InfluxClient {
    http: Client,
    base: Url,
    org: String,
    token: String,
}

impl InfluxClient {
    /// Bind `http` to `creds`. Validates the URL; performs no I/O.
    pub fn connect(http: &Client, creds: &Credentials) -> Result<Self, ClientError> {
        let mut base = Url::parse(&creds.url).map_err(|e| ClientError::InvalidUrl {
            url: creds.url.clone(),
            reason: e.to_string(),
        })?;
        // Url::join drops the last path segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        debug!(url = %base, org = %creds.org, "Opened InfluxDB client");
        Ok(Self {
            http: http.clone(),
            base,
            org: creds.org.clone(),
            token: creds.token.clone(),
        })
    }

    /// `true` when the server answers `/ping` with a success status.
    pub async fn ping(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.endpoint("ping")?).send().await?;
        let status = resp.status();
        debug!(%status, "InfluxDB ping");
        Ok(status.is_success())
    }

    /// All buckets visible to the token, in server order.
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>, ClientError> {
        let resp = self
            .http
            .get(self.endpoint("api/v2/buckets")?)
            .header("Authorization", format!("Token {}", self.token))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let parsed: BucketsResponse = resp.json().await?;
        let buckets = parsed.buckets.unwrap_or_default();
        debug!(org = %self.org, count = buckets.len(), "Listed buckets");
        Ok(buckets)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|e| ClientError::InvalidUrl {
            url: self.base.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Drop for InfluxClient {
    fn drop(&mut self) {
        trace!(url = %self.base, "Closed InfluxDB client");
    }
}

use crate::client::{ClientError, InfluxClient};
use crate::config::Config;
use crate::schemas::Credentials;
use crate::store::CredentialStore;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

pub struct AppState {
    pub client: Client,
    pub store: CredentialStore,
    pub max_request_body_bytes: usize,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
            debug!("InfluxDB request timeout: {}s", secs);
        }
        if let Some(secs) = cfg.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
            debug!("InfluxDB connect timeout: {}s", secs);
        }
        let client = builder.build()?;

        let store = CredentialStore::new(cfg.credentials_path());
        info!("Credentials file: '{}'", store.path().display());

        // Default to 1 MB if not specified
        const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;
        let max_request_body_bytes = cfg.max_request_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        debug!("Maximum request body size: {} bytes", max_request_body_bytes);

        Ok(AppState {
            client,
            store,
            max_request_body_bytes,
        })
    }

    /// Per-request InfluxDB handle for `creds`.
    pub fn influx(&self, creds: &Credentials) -> Result<InfluxClient, ClientError> {
        InfluxClient::connect(&self.client, creds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn appstate_from_config_applies_defaults() {
        let st = AppState::from_config(&Config::default()).expect("build state");
        assert_eq!(st.max_request_body_bytes, 1_048_576);
        assert_eq!(
            st.store.path(),
            Path::new(crate::config::DEFAULT_CREDENTIALS_PATH)
        );
    }

    #[test]
    fn appstate_uses_configured_path_and_limits() {
        let cfg = Config {
            listen: None,
            credentials_path: Some("/tmp/fv/creds.json".into()),
            timeout_secs: Some(1),
            connect_timeout_secs: Some(1),
            max_request_body_bytes: Some(64),
        };
        let st = AppState::from_config(&cfg).expect("build state");
        assert_eq!(st.store.path(), Path::new("/tmp/fv/creds.json"));
        assert_eq!(st.max_request_body_bytes, 64);
    }
}

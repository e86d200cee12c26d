use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::info;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8000";
pub const DEFAULT_CREDENTIALS_PATH: &str = "data/credentials.json";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub listen: Option<String>,
    // Where the InfluxDB credentials record is persisted.
    // Defaults to `data/credentials.json` relative to the working directory.
    pub credentials_path: Option<PathBuf>,
    // Total timeout in seconds for each call to InfluxDB.
    // If not set, reqwest's default applies (no timeout).
    pub timeout_secs: Option<u64>,
    // Connection timeout in seconds for reaching InfluxDB.
    pub connect_timeout_secs: Option<u64>,
    // Maximum request body size in bytes. Larger bodies are rejected with 413.
    // If not set, defaults to 1 MB.
    pub max_request_body_bytes: Option<usize>,
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let cfg_str = fs::read_to_string(path)?;
        Ok(toml::from_str(&cfg_str)?)
    }

    /// Like [`Config::from_file`], but a missing file yields the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        match Self::from_file(path) {
            Ok(cfg) => Ok(cfg),
            Err(e)
                if e.downcast_ref::<io::Error>()
                    .is_some_and(|err| err.kind() == io::ErrorKind::NotFound) =>
            {
                info!("Config file '{}' not found, using defaults", path);
                Ok(Config::default())
            }
            Err(e) => Err(anyhow::anyhow!("Invalid config file '{}': {}", path, e)),
        }
    }

    pub fn credentials_path(&self) -> &Path {
        self.credentials_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CREDENTIALS_PATH))
    }
}

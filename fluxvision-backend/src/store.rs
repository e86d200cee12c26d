use crate::error::ApiError;
use crate::schemas::Credentials;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Single credentials record persisted as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored record.
    ///
    /// Each save fills its own temp file next to the target and renames it
    /// into place, so overlapping saves all succeed (last rename wins) and
    /// readers never observe a half-written record.
    pub async fn save(&self, creds: &Credentials) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(creds).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_replace(&path, &body))
            .await
            .map_err(|e| StoreError::Io {
                path: self.path.clone(),
                source: io::Error::other(e),
            })??;

        info!(path = %self.path.display(), url = %creds.url, org = %creds.org, "Saved credentials");
        Ok(())
    }

    /// Read the stored record. A missing file is `Ok(None)`, not an error.
    pub async fn read_if_present(&self) -> Result<Option<Credentials>, StoreError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No credentials file");
                return Ok(None);
            }
            Err(e) => return Err(self.io_err(&self.path, e)),
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Credentials every InfluxDB call runs with.
    ///
    /// Only the persisted file is consulted: absent means
    /// [`ApiError::NotConfigured`], unreadable means [`ApiError::ReadCredentials`].
    pub async fn resolve(&self) -> Result<Credentials, ApiError> {
        match self.read_if_present().await {
            Ok(Some(creds)) => Ok(creds),
            Ok(None) => Err(ApiError::NotConfigured),
            Err(e) => {
                warn!("Failed to load credentials: {}", e);
                Err(ApiError::ReadCredentials(e))
            }
        }
    }

    fn io_err(&self, path: &Path, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn write_replace(path: &Path, body: &[u8]) -> Result<(), StoreError> {
    let io_err = |at: &Path, source: io::Error| StoreError::Io {
        path: at.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    // Removed on drop unless persisted.
    let mut tmp = tempfile::Builder::new()
        .prefix(".credentials")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| io_err(dir, e))?;
    tmp.write_all(body).map_err(|e| io_err(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| io_err(path, e))?;
    tmp.persist(path).map_err(|e| io_err(path, e.error))?;
    Ok(())
}

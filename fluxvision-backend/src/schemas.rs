use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection parameters for one InfluxDB instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub url: String,
    pub org: String,
    pub token: String,
}

impl Credentials {
    /// Short view of the token for error messages: returns the first 6
    /// chars (fewer for tokens that short, never the whole token) and the
    /// token length in characters.
    pub fn token_hint(&self) -> (String, usize) {
        let len = self.token.chars().count();
        let prefix = self.token.chars().take(len.saturating_sub(1).min(6)).collect();
        (prefix, len)
    }
}

// Keeps the token out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("org", &self.org)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Query payload for the planned Flux/InfluxQL endpoint. Not routed yet.
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(rename = "type", default = "default_query_type")]
    pub kind: String,
}

#[allow(dead_code)]
fn default_query_type() -> String {
    "flux".to_string()
}

/// A bucket as relayed to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

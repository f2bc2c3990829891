//! CDN storage zone configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external CDN storage zone.
///
/// The access key is read at request time; an empty key surfaces as a
/// configuration error on the first CDN call, not at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Storage zone name.
    #[serde(default)]
    pub storage_zone: String,
    /// Storage zone access key.
    #[serde(default)]
    pub access_key: String,
    /// Base URL of the storage API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "https://storage.bunnycdn.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and password settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
}

fn default_access_ttl() -> u64 {
    60
}

//! Outbound SMTP mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay and share-link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay hostname.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address for outbound mail.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Public base URL used to build share links in emails.
    #[serde(default = "default_base_url")]
    pub share_base_url: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from() -> String {
    "noreply@gfiles.local".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

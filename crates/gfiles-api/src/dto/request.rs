//! Request DTOs with validation.
//!
//! Sharing and report bodies use camelCase keys — the wire contract the
//! dashboard UI already speaks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create share request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    /// Path of the item to share.
    #[validate(length(min = 1, message = "itemPath is required"))]
    pub item_path: String,
    /// Name of the item to share.
    #[validate(length(min = 1, message = "itemName is required"))]
    pub item_name: String,
    /// `"file"` or `"folder"`.
    pub item_type: String,
    /// `"user"` or `"contact"`.
    pub sharing_type: String,
    /// Target user (user shares).
    pub shared_with_user_id: Option<Uuid>,
    /// Target contact (contact shares).
    pub shared_with_contact_id: Option<Uuid>,
    /// When the share expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share link expires (contact shares).
    pub share_link_expires_at: Option<DateTime<Utc>>,
    /// Permission: view.
    #[serde(default = "default_true")]
    pub can_view: bool,
    /// Permission: download.
    #[serde(default = "default_true")]
    pub can_download: bool,
    /// Permission: edit.
    #[serde(default)]
    pub can_edit: bool,
    /// Permission: delete.
    #[serde(default)]
    pub can_delete: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// The caller acknowledges a non-compliant share.
    #[serde(default)]
    pub user_acknowledged: bool,
    /// Justification for the acknowledgement.
    pub user_justification: Option<String>,
}

/// Share notification request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendShareEmailRequest {
    /// The shared item to notify about.
    pub shared_item_id: Uuid,
    /// The contact to notify.
    pub contact_id: Uuid,
}

/// Report generation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    /// Start of the covered range (inclusive).
    pub start_date: Option<DateTime<Utc>>,
    /// End of the covered range (inclusive).
    pub end_date: Option<DateTime<Utc>>,
}

/// Scan request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScanFileApiRequest {
    /// Path of the file.
    #[validate(length(min = 1, message = "filePath is required"))]
    pub file_path: String,
    /// File name.
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
    /// File type / extension.
    pub file_type: Option<String>,
    /// Decoded text content; omit when the content could not be read.
    pub content: Option<String>,
    /// File size in bytes.
    #[serde(default)]
    pub file_size: i64,
}

fn default_true() -> bool {
    true
}

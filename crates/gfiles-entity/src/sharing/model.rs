//! Sharing entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Type of item being shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A single file.
    File,
    /// A folder.
    Folder,
}

/// Who the item is shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sharing_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharingType {
    /// Shared with another internal user.
    User,
    /// Shared with an external CRM contact via a share link.
    Contact,
}

/// Audit record of one share request, successful or blocked.
///
/// Exactly one of allowed/blocked holds per row (`gdpr_compliant`);
/// `blocked_reason` is non-null iff the attempt was blocked. Immutable
/// once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharingAttempt {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// The user who attempted the share.
    pub user_id: Uuid,
    /// Path of the item.
    pub item_path: String,
    /// Name of the item.
    pub item_name: String,
    /// File or folder.
    pub item_type: ItemType,
    /// User or contact share.
    pub sharing_type: SharingType,
    /// Target user (user shares).
    pub shared_with_user_id: Option<Uuid>,
    /// Target contact (contact shares).
    pub shared_with_contact_id: Option<Uuid>,
    /// Outcome of the compliance check at decision time.
    pub gdpr_compliant: bool,
    /// Why the attempt was blocked, if it was.
    pub blocked_reason: Option<String>,
    /// Whether a fresh scan was required and missing.
    pub scan_required: bool,
    /// Whether a fresh scan existed for the item.
    pub scan_completed: bool,
    /// Whether the user acknowledged a non-compliant share.
    pub user_acknowledged: bool,
    /// Justification supplied with the acknowledgement.
    pub user_justification: Option<String>,
    /// The scan result consulted, if any.
    pub scan_result_id: Option<Uuid>,
    /// When the attempt happened.
    pub attempt_date: DateTime<Utc>,
    /// Requester IP address.
    pub ip_address: Option<String>,
    /// Requester User-Agent.
    pub user_agent: Option<String>,
}

/// Data required to record a sharing attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharingAttempt {
    /// The user who attempted the share.
    pub user_id: Uuid,
    /// Path of the item.
    pub item_path: String,
    /// Name of the item.
    pub item_name: String,
    /// File or folder.
    pub item_type: ItemType,
    /// User or contact share.
    pub sharing_type: SharingType,
    /// Target user (user shares).
    pub shared_with_user_id: Option<Uuid>,
    /// Target contact (contact shares).
    pub shared_with_contact_id: Option<Uuid>,
    /// Outcome of the compliance check.
    pub gdpr_compliant: bool,
    /// Why the attempt was blocked, if it was.
    pub blocked_reason: Option<String>,
    /// Whether a fresh scan was required and missing.
    pub scan_required: bool,
    /// Whether a fresh scan existed.
    pub scan_completed: bool,
    /// Whether the user acknowledged a non-compliant share.
    pub user_acknowledged: bool,
    /// Justification supplied with the acknowledgement.
    pub user_justification: Option<String>,
    /// The scan result consulted, if any.
    pub scan_result_id: Option<Uuid>,
    /// Requester IP address.
    pub ip_address: Option<String>,
    /// Requester User-Agent.
    pub user_agent: Option<String>,
}

/// A successfully authorized share.
///
/// `sharing_type` determines which target field is populated; contact
/// shares additionally carry an unguessable share link token. Revocation
/// deactivates the row rather than deleting it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharedItem {
    /// Unique share identifier.
    pub id: Uuid,
    /// Path of the shared item.
    pub item_path: String,
    /// Name of the shared item.
    pub item_name: String,
    /// File or folder.
    pub item_type: ItemType,
    /// The user who shared the item.
    pub shared_by: Uuid,
    /// User or contact share.
    pub sharing_type: SharingType,
    /// Target user (user shares).
    pub shared_with_user_id: Option<Uuid>,
    /// Target contact (contact shares).
    pub shared_with_contact_id: Option<Uuid>,
    /// Opaque share link token (contact shares only).
    pub share_link: Option<String>,
    /// When the share itself expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share link expires (contact shares only).
    pub share_link_expires_at: Option<DateTime<Utc>>,
    /// Permission: view.
    pub can_view: bool,
    /// Permission: download.
    pub can_download: bool,
    /// Permission: edit.
    pub can_edit: bool,
    /// Permission: delete.
    pub can_delete: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether the share is currently active.
    pub is_active: bool,
    /// When the share was created.
    pub shared_at: DateTime<Utc>,
}

impl SharedItem {
    /// Check if the share is currently valid.
    pub fn is_valid(&self) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(expires_at) = self.expires_at {
            if expires_at <= Utc::now() {
                return false;
            }
        }
        true
    }

    /// Human-readable list of granted permissions.
    pub fn permission_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.can_view {
            labels.push("view");
        }
        if self.can_download {
            labels.push("download");
        }
        if self.can_edit {
            labels.push("edit");
        }
        if self.can_delete {
            labels.push("delete");
        }
        labels
    }
}

/// Data required to create a new shared item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedItem {
    /// Path of the shared item.
    pub item_path: String,
    /// Name of the shared item.
    pub item_name: String,
    /// File or folder.
    pub item_type: ItemType,
    /// The user who shares the item.
    pub shared_by: Uuid,
    /// User or contact share.
    pub sharing_type: SharingType,
    /// Target user (user shares).
    pub shared_with_user_id: Option<Uuid>,
    /// Target contact (contact shares).
    pub shared_with_contact_id: Option<Uuid>,
    /// Opaque share link token (contact shares only).
    pub share_link: Option<String>,
    /// When the share expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share link expires.
    pub share_link_expires_at: Option<DateTime<Utc>>,
    /// Permission: view.
    pub can_view: bool,
    /// Permission: download.
    pub can_download: bool,
    /// Permission: edit.
    pub can_edit: bool,
    /// Permission: delete.
    pub can_delete: bool,
    /// Free-text description.
    pub description: Option<String>,
}

/// Marker row: this item appears in this user's shared view.
///
/// Upserted on every user share; duplicate shares do not duplicate rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSharedFolder {
    /// Unique marker identifier.
    pub id: Uuid,
    /// The user whose view contains the item.
    pub user_id: Uuid,
    /// Path of the shared item.
    pub item_path: String,
    /// When the marker was first created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_share_is_invalid() {
        let item = SharedItem {
            id: Uuid::new_v4(),
            item_path: "/docs/a.pdf".into(),
            item_name: "a.pdf".into(),
            item_type: ItemType::File,
            shared_by: Uuid::new_v4(),
            sharing_type: SharingType::User,
            shared_with_user_id: Some(Uuid::new_v4()),
            shared_with_contact_id: None,
            share_link: None,
            expires_at: Some(Utc::now() - chrono::Duration::hours(1)),
            share_link_expires_at: None,
            can_view: true,
            can_download: true,
            can_edit: false,
            can_delete: false,
            description: None,
            is_active: true,
            shared_at: Utc::now(),
        };
        assert!(!item.is_valid());
    }

    #[test]
    fn test_permission_labels() {
        let item = SharedItem {
            id: Uuid::new_v4(),
            item_path: "/x".into(),
            item_name: "x".into(),
            item_type: ItemType::Folder,
            shared_by: Uuid::new_v4(),
            sharing_type: SharingType::User,
            shared_with_user_id: Some(Uuid::new_v4()),
            shared_with_contact_id: None,
            share_link: None,
            expires_at: None,
            share_link_expires_at: None,
            can_view: true,
            can_download: false,
            can_edit: true,
            can_delete: false,
            description: None,
            is_active: true,
            shared_at: Utc::now(),
        };
        assert_eq!(item.permission_labels(), vec!["view", "edit"]);
    }
}

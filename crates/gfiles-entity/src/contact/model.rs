//! CRM contact entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An external CRM contact. Contacts receive shares through unguessable
/// share links delivered by email; they never authenticate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    /// Unique contact identifier.
    pub id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address, if known. Required for share notifications.
    pub email: Option<String>,
    /// Company the contact belongs to.
    pub company_name: Option<String>,
    /// Customer number in the ERP system, if synchronized.
    pub erp_customer_id: Option<String>,
    /// Whether the contact is active.
    pub is_active: bool,
    /// When the contact was created.
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An organizational department. Used to partition the CDN folder tree
/// and group users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    /// Unique department identifier.
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Short code used as the CDN top-level folder name.
    pub code: String,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
}

//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name shown in share views.
    pub display_name: Option<String>,
    /// Role in the RBAC hierarchy.
    pub role: UserRole,
    /// Department the user belongs to.
    pub department_id: Option<Uuid>,
    /// Whether the account is active.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Department.
    pub department_id: Option<Uuid>,
}

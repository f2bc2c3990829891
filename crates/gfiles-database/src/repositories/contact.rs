//! Contact repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use gfiles_core::error::{AppError, ErrorKind};
use gfiles_core::result::AppResult;
use gfiles_entity::contact::Contact;

/// Repository for CRM contact lookups.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an active contact by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find contact", e))
    }
}

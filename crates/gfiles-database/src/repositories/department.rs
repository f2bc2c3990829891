//! Department repository implementation.

use sqlx::PgPool;

use gfiles_core::error::{AppError, ErrorKind};
use gfiles_core::result::AppResult;
use gfiles_entity::department::Department;

/// Repository for department lookups.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    /// Create a new department repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all departments.
    pub async fn find_all(&self) -> AppResult<Vec<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY code")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list departments", e)
            })
    }
}

//! Sharing repository implementation.
//!
//! Owns the three sharing tables: the attempt audit log, the shared items,
//! and the per-user shared-folder markers. The success path writes all
//! three in a single transaction so a crash can never leave an authorized
//! attempt without its share (or the reverse).

use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use gfiles_core::error::{AppError, ErrorKind};
use gfiles_core::result::AppResult;
use gfiles_core::types::pagination::{PageRequest, PageResponse};
use gfiles_entity::sharing::{
    CreateSharedItem, CreateSharingAttempt, SharedItem, SharingAttempt, SharingType,
};

/// Repository for shared items, sharing attempts, and folder markers.
#[derive(Debug, Clone)]
pub struct SharingRepository {
    pool: PgPool,
}

impl SharingRepository {
    /// Create a new sharing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a sharing attempt (used alone for blocked attempts).
    pub async fn log_attempt(&self, data: &CreateSharingAttempt) -> AppResult<SharingAttempt> {
        insert_attempt(&self.pool, data).await
    }

    /// Record an authorized share atomically: the shared item, the
    /// successful attempt row, and (for user shares) the shared-folder
    /// marker all commit or none do.
    pub async fn record_authorized_share(
        &self,
        attempt: &CreateSharingAttempt,
        item: &CreateSharedItem,
    ) -> AppResult<(SharedItem, SharingAttempt)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let created_item = insert_item(&mut *tx, item).await?;
        let logged_attempt = insert_attempt(&mut *tx, attempt).await?;

        if item.sharing_type == SharingType::User {
            if let Some(target_user) = item.shared_with_user_id {
                upsert_folder_marker(&mut *tx, target_user, &item.item_path).await?;
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit share", e)
        })?;

        Ok((created_item, logged_attempt))
    }

    /// Find a shared item by ID.
    pub async fn find_item_by_id(&self, id: Uuid) -> AppResult<Option<SharedItem>> {
        sqlx::query_as::<_, SharedItem>("SELECT * FROM shared_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find shared item", e)
            })
    }

    /// List active shares created by a user.
    pub async fn find_shared_by(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SharedItem>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shared_items WHERE shared_by = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count shares", e))?;

        let items = sqlx::query_as::<_, SharedItem>(
            "SELECT * FROM shared_items WHERE shared_by = $1 AND is_active = TRUE \
             ORDER BY shared_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List active shares targeted at a user.
    pub async fn find_shared_with(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SharedItem>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shared_items \
             WHERE shared_with_user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count shared-with", e)
        })?;

        let items = sqlx::query_as::<_, SharedItem>(
            "SELECT * FROM shared_items WHERE shared_with_user_id = $1 AND is_active = TRUE \
             ORDER BY shared_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shared-with", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all attempts whose date falls in `[start, end]`.
    pub async fn find_attempts_between(
        &self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Vec<SharingAttempt>> {
        sqlx::query_as::<_, SharingAttempt>(
            "SELECT * FROM sharing_attempts WHERE attempt_date BETWEEN $1 AND $2 \
             ORDER BY attempt_date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attempts", e))
    }
}

async fn insert_attempt<'e, E>(executor: E, data: &CreateSharingAttempt) -> AppResult<SharingAttempt>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, SharingAttempt>(
        "INSERT INTO sharing_attempts (user_id, item_path, item_name, item_type, sharing_type, \
         shared_with_user_id, shared_with_contact_id, gdpr_compliant, blocked_reason, \
         scan_required, scan_completed, user_acknowledged, user_justification, scan_result_id, \
         ip_address, user_agent) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         RETURNING *",
    )
    .bind(data.user_id)
    .bind(&data.item_path)
    .bind(&data.item_name)
    .bind(data.item_type)
    .bind(data.sharing_type)
    .bind(data.shared_with_user_id)
    .bind(data.shared_with_contact_id)
    .bind(data.gdpr_compliant)
    .bind(&data.blocked_reason)
    .bind(data.scan_required)
    .bind(data.scan_completed)
    .bind(data.user_acknowledged)
    .bind(&data.user_justification)
    .bind(data.scan_result_id)
    .bind(&data.ip_address)
    .bind(&data.user_agent)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to log sharing attempt", e))
}

async fn insert_item<'e, E>(executor: E, data: &CreateSharedItem) -> AppResult<SharedItem>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, SharedItem>(
        "INSERT INTO shared_items (item_path, item_name, item_type, shared_by, sharing_type, \
         shared_with_user_id, shared_with_contact_id, share_link, expires_at, \
         share_link_expires_at, can_view, can_download, can_edit, can_delete, description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING *",
    )
    .bind(&data.item_path)
    .bind(&data.item_name)
    .bind(data.item_type)
    .bind(data.shared_by)
    .bind(data.sharing_type)
    .bind(data.shared_with_user_id)
    .bind(data.shared_with_contact_id)
    .bind(&data.share_link)
    .bind(data.expires_at)
    .bind(data.share_link_expires_at)
    .bind(data.can_view)
    .bind(data.can_download)
    .bind(data.can_edit)
    .bind(data.can_delete)
    .bind(&data.description)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create shared item", e))
}

async fn upsert_folder_marker<'e, E>(executor: E, user_id: Uuid, item_path: &str) -> AppResult<()>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        "INSERT INTO user_shared_folders (user_id, item_path) VALUES ($1, $2) \
         ON CONFLICT (user_id, item_path) DO NOTHING",
    )
    .bind(user_id)
    .bind(item_path)
    .execute(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert folder marker", e))?;
    Ok(())
}

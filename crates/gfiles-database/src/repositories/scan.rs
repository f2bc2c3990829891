//! Scan result repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gfiles_core::error::{AppError, ErrorKind};
use gfiles_core::result::AppResult;
use gfiles_entity::scan::{CreateScanResult, ScanResult};

/// Repository for the scan result store.
///
/// Scan results are append-only: a rescan inserts a new row and readers
/// consult the most recent one for a path.
#[derive(Debug, Clone)]
pub struct ScanRepository {
    pool: PgPool,
}

impl ScanRepository {
    /// Create a new scan repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new scan result.
    pub async fn create(&self, data: &CreateScanResult) -> AppResult<ScanResult> {
        sqlx::query_as::<_, ScanResult>(
            "INSERT INTO scan_results (file_path, file_name, has_personal_data, \
             personal_data_types, risk_level, file_type, file_size, scan_duration_ms, scan_errors) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.file_path)
        .bind(&data.file_name)
        .bind(data.has_personal_data)
        .bind(&data.personal_data_types)
        .bind(data.risk_level)
        .bind(&data.file_type)
        .bind(data.file_size)
        .bind(data.scan_duration_ms)
        .bind(&data.scan_errors)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create scan result", e))
    }

    /// Find the most recent scan for a path, if any.
    pub async fn find_latest_for_path(&self, file_path: &str) -> AppResult<Option<ScanResult>> {
        sqlx::query_as::<_, ScanResult>(
            "SELECT * FROM scan_results WHERE file_path = $1 ORDER BY scan_date DESC LIMIT 1",
        )
        .bind(file_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest scan", e))
    }

    /// List all scans whose scan date falls in `[start, end]`.
    pub async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<ScanResult>> {
        sqlx::query_as::<_, ScanResult>(
            "SELECT * FROM scan_results WHERE scan_date BETWEEN $1 AND $2 ORDER BY scan_date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list scans", e))
    }
}

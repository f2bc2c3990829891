//! GDPR report repository implementation.

use sqlx::PgPool;

use gfiles_core::error::{AppError, ErrorKind};
use gfiles_core::result::AppResult;
use gfiles_core::types::pagination::{PageRequest, PageResponse};
use gfiles_entity::report::{CreateGdprReport, GdprReport};

/// Repository for generated compliance reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a generated report.
    pub async fn create(&self, data: &CreateGdprReport) -> AppResult<GdprReport> {
        sqlx::query_as::<_, GdprReport>(
            "INSERT INTO gdpr_reports (report_type, start_date, end_date, generated_by, status, \
             report_data) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.report_type)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.generated_by)
        .bind(data.status)
        .bind(&data.report_data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create report", e))
    }

    /// List reports, newest first.
    pub async fn find_paginated(&self, page: &PageRequest) -> AppResult<PageResponse<GdprReport>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gdpr_reports")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reports", e))?;

        let reports = sqlx::query_as::<_, GdprReport>(
            "SELECT * FROM gdpr_reports ORDER BY generated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reports", e))?;

        Ok(PageResponse::new(
            reports,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

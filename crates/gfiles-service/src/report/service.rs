//! Report generation service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use gfiles_core::error::AppError;
use gfiles_core::result::AppResult;
use gfiles_core::types::pagination::{PageRequest, PageResponse};
use gfiles_database::repositories::report::ReportRepository;
use gfiles_database::repositories::scan::ScanRepository;
use gfiles_database::repositories::sharing::SharingRepository;
use gfiles_entity::report::{CreateGdprReport, GdprReport, ReportStatus};

use super::aggregate::build_report_payload;

/// Report type tag for sharing compliance reports.
const SHARING_COMPLIANCE: &str = "sharing-compliance";

/// Generates and lists compliance reports.
///
/// Generation reads the attempt and scan stores for the requested range,
/// reduces them into the payload, and persists exactly one immutable
/// report row — a point-in-time snapshot, never recomputed in place.
#[derive(Debug, Clone)]
pub struct ReportService {
    /// Sharing repository for the attempt log.
    sharing_repo: Arc<SharingRepository>,
    /// Scan result store.
    scan_repo: Arc<ScanRepository>,
    /// Report store.
    report_repo: Arc<ReportRepository>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        sharing_repo: Arc<SharingRepository>,
        scan_repo: Arc<ScanRepository>,
        report_repo: Arc<ReportRepository>,
    ) -> Self {
        Self {
            sharing_repo,
            scan_repo,
            report_repo,
        }
    }

    /// Generate a sharing-compliance report for `[start, end]`.
    pub async fn generate(
        &self,
        generated_by: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<GdprReport> {
        if start > end {
            return Err(AppError::validation(
                "start_date must not be after end_date",
            ));
        }

        let attempts = self.sharing_repo.find_attempts_between(start, end).await?;
        let scans = self.scan_repo.find_between(start, end).await?;

        let attempt_count = attempts.len();
        let scan_count = scans.len();
        let payload = build_report_payload(attempts, scans);

        let report = self
            .report_repo
            .create(&CreateGdprReport {
                report_type: SHARING_COMPLIANCE.to_string(),
                start_date: start,
                end_date: end,
                generated_by,
                status: ReportStatus::Completed,
                report_data: serde_json::to_value(&payload)?,
            })
            .await?;

        info!(
            report_id = %report.id,
            generated_by = %generated_by,
            attempts = attempt_count,
            scans = scan_count,
            "Compliance report generated"
        );

        Ok(report)
    }

    /// List generated reports, newest first.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<GdprReport>> {
        self.report_repo.find_paginated(&page).await
    }
}

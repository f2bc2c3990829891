//! Periodic compliance report job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use gfiles_service::report::ReportService;

use crate::executor::{JobExecutionError, JobHandler};

/// Job type for the periodic compliance report.
pub const COMPLIANCE_REPORT: &str = "compliance_report";

/// Reports generated by the scheduler are attributed to the seeded
/// system account.
const SYSTEM_USER_ID: Uuid = Uuid::from_u128(1);

/// Generates the weekly sharing-compliance report through the same
/// service the API uses.
#[derive(Debug)]
pub struct ComplianceReportJobHandler {
    /// Report service.
    report_service: Arc<ReportService>,
}

impl ComplianceReportJobHandler {
    /// Create a new report job handler
    pub fn new(report_service: Arc<ReportService>) -> Self {
        Self { report_service }
    }
}

#[async_trait]
impl JobHandler for ComplianceReportJobHandler {
    fn job_type(&self) -> &str {
        COMPLIANCE_REPORT
    }

    async fn run(&self) -> Result<Option<Value>, JobExecutionError> {
        let end = Utc::now();
        let start = end - Duration::days(7);

        let report = self
            .report_service
            .generate(SYSTEM_USER_ID, start, end)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Report generation failed: {e}")))?;

        Ok(Some(serde_json::json!({
            "report_id": report.id,
            "start_date": report.start_date.to_rfc3339(),
            "end_date": report.end_date.to_rfc3339(),
        })))
    }
}

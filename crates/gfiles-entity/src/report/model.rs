//! GDPR report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Generation status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Generated successfully.
    Completed,
    /// Generation failed.
    Failed,
}

/// A generated compliance report. Immutable: reports are point-in-time
/// snapshots, never recomputed in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GdprReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Report type tag (e.g. `"sharing-compliance"`).
    pub report_type: String,
    /// Start of the covered range (inclusive).
    pub start_date: DateTime<Utc>,
    /// End of the covered range (inclusive).
    pub end_date: DateTime<Utc>,
    /// The user who generated the report.
    pub generated_by: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Generation status.
    pub status: ReportStatus,
    /// The aggregate payload (see [`super::payload::ReportPayload`]).
    pub report_data: serde_json::Value,
}

/// Data required to persist a new report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGdprReport {
    /// Report type tag.
    pub report_type: String,
    /// Start of the covered range.
    pub start_date: DateTime<Utc>,
    /// End of the covered range.
    pub end_date: DateTime<Utc>,
    /// The user who generated the report.
    pub generated_by: Uuid,
    /// Generation status.
    pub status: ReportStatus,
    /// The aggregate payload.
    pub report_data: serde_json::Value,
}

//! The stored report payload contract.
//!
//! The JSON shape of [`ReportPayload`] is consumed by the report UI and by
//! previously stored reports, so the top-level keys and their camelCase
//! spelling are frozen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scan::ScanResult;
use crate::sharing::SharingAttempt;

/// Aggregate payload persisted in `gdpr_reports.report_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    /// Headline counts and the compliance rate.
    pub summary: ReportSummary,
    /// Per-user attempt statistics.
    pub user_statistics: Vec<UserStatistics>,
    /// Scan counts and file lists per risk level.
    pub risk_level_breakdown: BTreeMap<String, RiskLevelBucket>,
    /// Scan counts per personal-data category. A scan carrying several
    /// categories contributes to each of them.
    pub personal_data_type_breakdown: BTreeMap<String, u64>,
    /// The ten most-blocked items, descending by blocked count.
    pub top_blocked_files: Vec<BlockedFileEntry>,
    /// Every sharing attempt in range (audit export).
    pub detailed_sharing_attempts: Vec<SharingAttempt>,
    /// Every scan result in range (audit export).
    pub file_scan_results: Vec<ScanResult>,
}

/// Headline counts for the covered range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Total sharing attempts.
    pub total_sharing_attempts: u64,
    /// Blocked attempts.
    pub blocked_attempts: u64,
    /// Successful attempts.
    pub successful_attempts: u64,
    /// successful / total as a 2-decimal percentage string; `"0.00"` when
    /// there were no attempts.
    pub compliance_rate: String,
    /// Scans that found personal data.
    pub files_with_personal_data: u64,
    /// Scans classified critical.
    pub critical_risk_files: u64,
}

/// Per-user attempt statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    /// The user these counts belong to.
    pub user_id: Uuid,
    /// Total attempts by this user.
    pub total_attempts: u64,
    /// Blocked attempts.
    pub blocked_attempts: u64,
    /// Successful attempts.
    pub successful_attempts: u64,
    /// Attempts blocked for a missing scan.
    pub scan_required: u64,
    /// Attempts for which a fresh scan existed.
    pub scan_completed: u64,
}

/// Scan counts and file list for one risk level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevelBucket {
    /// Number of scans at this level.
    pub count: u64,
    /// Paths of the scanned files.
    pub files: Vec<String>,
}

/// One entry of the top-blocked-files list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedFileEntry {
    /// Path of the blocked item.
    pub item_path: String,
    /// Name of the blocked item.
    pub item_name: String,
    /// How many attempts against this path were blocked.
    pub blocked_count: u64,
    /// Distinct block reasons observed (deduplicated).
    pub blocked_reasons: Vec<String>,
}

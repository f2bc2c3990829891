//! Scan result entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ordinal classification of a file's personal-data sensitivity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "risk_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No personal data detected.
    Low,
    /// Some personal data detected.
    Medium,
    /// Sensitive identifiers or several categories detected.
    High,
    /// Highly sensitive identifiers detected, or content unreadable.
    Critical,
}

impl RiskLevel {
    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// One scan of one file path. Immutable once written: a rescan inserts a
/// new row rather than updating an existing one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanResult {
    /// Unique scan identifier.
    pub id: Uuid,
    /// Path of the scanned file.
    pub file_path: String,
    /// File name (basename of the path).
    pub file_name: String,
    /// When the scan ran.
    pub scan_date: DateTime<Utc>,
    /// Whether any personal data was detected.
    pub has_personal_data: bool,
    /// Detected category tags (see [`super::PersonalDataType`]).
    pub personal_data_types: Vec<String>,
    /// Derived risk level.
    pub risk_level: RiskLevel,
    /// File type / extension, if known.
    pub file_type: Option<String>,
    /// File size in bytes.
    pub file_size: i64,
    /// Scan duration in milliseconds.
    pub scan_duration_ms: i64,
    /// Errors encountered while reading the content, if any.
    pub scan_errors: Option<String>,
}

impl ScanResult {
    /// Whether this scan is still within the freshness window.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        now - self.scan_date <= window
    }
}

/// Data required to persist a new scan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScanResult {
    /// Path of the scanned file.
    pub file_path: String,
    /// File name.
    pub file_name: String,
    /// Whether any personal data was detected.
    pub has_personal_data: bool,
    /// Detected category tags.
    pub personal_data_types: Vec<String>,
    /// Derived risk level.
    pub risk_level: RiskLevel,
    /// File type / extension.
    pub file_type: Option<String>,
    /// File size in bytes.
    pub file_size: i64,
    /// Scan duration in milliseconds.
    pub scan_duration_ms: i64,
    /// Errors encountered while reading the content.
    pub scan_errors: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let scan = ScanResult {
            id: Uuid::new_v4(),
            file_path: "/docs/a.pdf".into(),
            file_name: "a.pdf".into(),
            scan_date: now - chrono::Duration::hours(23),
            has_personal_data: false,
            personal_data_types: vec![],
            risk_level: RiskLevel::Low,
            file_type: Some("pdf".into()),
            file_size: 100,
            scan_duration_ms: 5,
            scan_errors: None,
        };
        assert!(scan.is_fresh(now, chrono::Duration::hours(24)));
        assert!(!scan.is_fresh(now + chrono::Duration::hours(2), chrono::Duration::hours(24)));
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }
}

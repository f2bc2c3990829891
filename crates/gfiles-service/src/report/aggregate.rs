//! Pure aggregation of sharing attempts and scan results into the stored
//! report payload.
//!
//! Everything here is an associative reduction: the result does not depend
//! on the iteration order of the inputs. Ties in the top-blocked list are
//! broken by item path ascending.

use std::collections::BTreeMap;

use uuid::Uuid;

use gfiles_entity::report::{
    BlockedFileEntry, ReportPayload, ReportSummary, RiskLevelBucket, UserStatistics,
};
use gfiles_entity::scan::{RiskLevel, ScanResult};
use gfiles_entity::sharing::SharingAttempt;

/// How many entries the top-blocked list carries.
const TOP_BLOCKED_LIMIT: usize = 10;

/// Build the report payload for the given attempts and scans.
pub fn build_report_payload(
    attempts: Vec<SharingAttempt>,
    scans: Vec<ScanResult>,
) -> ReportPayload {
    let summary = build_summary(&attempts, &scans);
    let user_statistics = build_user_statistics(&attempts);
    let risk_level_breakdown = build_risk_breakdown(&scans);
    let personal_data_type_breakdown = build_type_breakdown(&scans);
    let top_blocked_files = build_top_blocked(&attempts);

    ReportPayload {
        summary,
        user_statistics,
        risk_level_breakdown,
        personal_data_type_breakdown,
        top_blocked_files,
        detailed_sharing_attempts: attempts,
        file_scan_results: scans,
    }
}

fn build_summary(attempts: &[SharingAttempt], scans: &[ScanResult]) -> ReportSummary {
    let total = attempts.len() as u64;
    let blocked = attempts.iter().filter(|a| !a.gdpr_compliant).count() as u64;
    let successful = total - blocked;

    let compliance_rate = if total == 0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", successful as f64 / total as f64 * 100.0)
    };

    ReportSummary {
        total_sharing_attempts: total,
        blocked_attempts: blocked,
        successful_attempts: successful,
        compliance_rate,
        files_with_personal_data: scans.iter().filter(|s| s.has_personal_data).count() as u64,
        critical_risk_files: scans
            .iter()
            .filter(|s| s.risk_level == RiskLevel::Critical)
            .count() as u64,
    }
}

fn build_user_statistics(attempts: &[SharingAttempt]) -> Vec<UserStatistics> {
    let mut by_user: BTreeMap<Uuid, UserStatistics> = BTreeMap::new();

    for attempt in attempts {
        let stats = by_user
            .entry(attempt.user_id)
            .or_insert_with(|| UserStatistics {
                user_id: attempt.user_id,
                total_attempts: 0,
                blocked_attempts: 0,
                successful_attempts: 0,
                scan_required: 0,
                scan_completed: 0,
            });
        stats.total_attempts += 1;
        if attempt.gdpr_compliant {
            stats.successful_attempts += 1;
        } else {
            stats.blocked_attempts += 1;
        }
        if attempt.scan_required {
            stats.scan_required += 1;
        }
        if attempt.scan_completed {
            stats.scan_completed += 1;
        }
    }

    by_user.into_values().collect()
}

fn build_risk_breakdown(scans: &[ScanResult]) -> BTreeMap<String, RiskLevelBucket> {
    let mut breakdown: BTreeMap<String, RiskLevelBucket> = BTreeMap::new();
    for scan in scans {
        let bucket = breakdown.entry(scan.risk_level.as_str().to_string()).or_default();
        bucket.count += 1;
        bucket.files.push(scan.file_path.clone());
    }
    breakdown
}

fn build_type_breakdown(scans: &[ScanResult]) -> BTreeMap<String, u64> {
    let mut breakdown: BTreeMap<String, u64> = BTreeMap::new();
    for scan in scans {
        // A scan carrying several categories contributes to each bucket.
        for tag in &scan.personal_data_types {
            *breakdown.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    breakdown
}

fn build_top_blocked(attempts: &[SharingAttempt]) -> Vec<BlockedFileEntry> {
    let mut by_path: BTreeMap<String, BlockedFileEntry> = BTreeMap::new();

    for attempt in attempts.iter().filter(|a| !a.gdpr_compliant) {
        let entry = by_path
            .entry(attempt.item_path.clone())
            .or_insert_with(|| BlockedFileEntry {
                item_path: attempt.item_path.clone(),
                item_name: attempt.item_name.clone(),
                blocked_count: 0,
                blocked_reasons: Vec::new(),
            });
        entry.blocked_count += 1;
        if let Some(reason) = &attempt.blocked_reason {
            if !entry.blocked_reasons.contains(reason) {
                entry.blocked_reasons.push(reason.clone());
            }
        }
    }

    // BTreeMap iteration is path-ascending, so the stable sort leaves
    // equal counts in path order.
    let mut entries: Vec<BlockedFileEntry> = by_path.into_values().collect();
    entries.sort_by(|a, b| b.blocked_count.cmp(&a.blocked_count));
    entries.truncate(TOP_BLOCKED_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gfiles_entity::sharing::{ItemType, SharingType};

    fn attempt(user: Uuid, path: &str, compliant: bool, reason: Option<&str>) -> SharingAttempt {
        SharingAttempt {
            id: Uuid::new_v4(),
            user_id: user,
            item_path: path.to_string(),
            item_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            item_type: ItemType::File,
            sharing_type: SharingType::User,
            shared_with_user_id: Some(Uuid::new_v4()),
            shared_with_contact_id: None,
            gdpr_compliant: compliant,
            blocked_reason: reason.map(String::from),
            scan_required: reason == Some("requires scan"),
            scan_completed: compliant,
            user_acknowledged: false,
            user_justification: None,
            scan_result_id: None,
            attempt_date: Utc::now(),
            ip_address: None,
            user_agent: None,
        }
    }

    fn scan(path: &str, risk: RiskLevel, types: &[&str]) -> ScanResult {
        ScanResult {
            id: Uuid::new_v4(),
            file_path: path.to_string(),
            file_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            scan_date: Utc::now(),
            has_personal_data: !types.is_empty(),
            personal_data_types: types.iter().map(|s| s.to_string()).collect(),
            risk_level: risk,
            file_type: None,
            file_size: 10,
            scan_duration_ms: 1,
            scan_errors: None,
        }
    }

    #[test]
    fn test_empty_inputs_yield_zero_rate() {
        let payload = build_report_payload(vec![], vec![]);
        assert_eq!(payload.summary.total_sharing_attempts, 0);
        assert_eq!(payload.summary.compliance_rate, "0.00");
        assert!(payload.user_statistics.is_empty());
        assert!(payload.top_blocked_files.is_empty());
    }

    #[test]
    fn test_compliance_rate_two_decimals() {
        let u = Uuid::new_v4();
        let attempts = vec![
            attempt(u, "/a", true, None),
            attempt(u, "/b", true, None),
            attempt(u, "/c", false, Some("flagged")),
        ];
        let payload = build_report_payload(attempts, vec![]);
        assert_eq!(payload.summary.compliance_rate, "66.67");
        assert_eq!(payload.summary.blocked_attempts, 1);
        assert_eq!(payload.summary.successful_attempts, 2);
    }

    #[test]
    fn test_user_statistics_are_order_independent() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let forward = vec![
            attempt(alice, "/a", true, None),
            attempt(bob, "/b", false, Some("requires scan")),
            attempt(alice, "/c", false, Some("flagged")),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = build_report_payload(forward, vec![]);
        let b = build_report_payload(reversed, vec![]);
        assert_eq!(
            serde_json::to_value(&a.user_statistics).unwrap(),
            serde_json::to_value(&b.user_statistics).unwrap()
        );

        let alice_stats = a
            .user_statistics
            .iter()
            .find(|s| s.user_id == alice)
            .unwrap();
        assert_eq!(alice_stats.total_attempts, 2);
        assert_eq!(alice_stats.blocked_attempts, 1);
        assert_eq!(alice_stats.successful_attempts, 1);
    }

    #[test]
    fn test_type_breakdown_counts_every_category() {
        let scans = vec![
            scan("/a", RiskLevel::High, &["email", "tax-id"]),
            scan("/b", RiskLevel::Medium, &["email"]),
        ];
        let payload = build_report_payload(vec![], scans);
        assert_eq!(payload.personal_data_type_breakdown["email"], 2);
        assert_eq!(payload.personal_data_type_breakdown["tax-id"], 1);
    }

    #[test]
    fn test_risk_breakdown_collects_files() {
        let scans = vec![
            scan("/a", RiskLevel::Critical, &["iban"]),
            scan("/b", RiskLevel::Critical, &["credit-card"]),
            scan("/c", RiskLevel::Low, &[]),
        ];
        let payload = build_report_payload(vec![], scans);
        assert_eq!(payload.risk_level_breakdown["critical"].count, 2);
        assert_eq!(
            payload.risk_level_breakdown["critical"].files,
            vec!["/a".to_string(), "/b".to_string()]
        );
        assert_eq!(payload.summary.critical_risk_files, 2);
    }

    #[test]
    fn test_top_blocked_is_capped_sorted_and_deduplicated() {
        let u = Uuid::new_v4();
        let mut attempts = Vec::new();
        // 12 distinct blocked paths, one block each.
        for i in 0..12 {
            attempts.push(attempt(u, &format!("/bulk/{i:02}"), false, Some("flagged")));
        }
        // One path blocked three times with a repeated reason.
        for _ in 0..3 {
            attempts.push(attempt(u, "/hot/file.pdf", false, Some("flagged")));
        }
        attempts.push(attempt(u, "/hot/file.pdf", false, Some("requires scan")));

        let payload = build_report_payload(attempts, vec![]);
        assert_eq!(payload.top_blocked_files.len(), 10);
        assert_eq!(payload.top_blocked_files[0].item_path, "/hot/file.pdf");
        assert_eq!(payload.top_blocked_files[0].blocked_count, 4);
        assert_eq!(
            payload.top_blocked_files[0].blocked_reasons,
            vec!["flagged".to_string(), "requires scan".to_string()]
        );
        // Ties (count 1) stay in path order.
        assert_eq!(payload.top_blocked_files[1].item_path, "/bulk/00");
        let counts: Vec<u64> = payload
            .top_blocked_files
            .iter()
            .map(|e| e.blocked_count)
            .collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }

    #[test]
    fn test_detail_dumps_are_complete() {
        let u = Uuid::new_v4();
        let attempts = vec![attempt(u, "/a", true, None), attempt(u, "/b", false, Some("x"))];
        let scans = vec![scan("/a", RiskLevel::Low, &[])];
        let payload = build_report_payload(attempts, scans);
        assert_eq!(payload.detailed_sharing_attempts.len(), 2);
        assert_eq!(payload.file_scan_results.len(), 1);
    }

    #[test]
    fn test_payload_top_level_keys_are_frozen() {
        let payload = build_report_payload(vec![], vec![]);
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 7);
        for key in [
            "summary",
            "userStatistics",
            "riskLevelBreakdown",
            "personalDataTypeBreakdown",
            "topBlockedFiles",
            "detailedSharingAttempts",
            "fileScanResults",
        ] {
            assert!(object.contains_key(key), "missing payload key '{key}'");
        }
    }
}

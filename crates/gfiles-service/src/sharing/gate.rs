//! The GDPR sharing authorization gate.
//!
//! Every share request passes through [`SharingGateService::authorize_share`],
//! which decides in one request/response cycle whether the share is
//! compliant, whether an acknowledgement overrides a block, and persists an
//! audit record of the attempt regardless of outcome. The success path
//! (shared item + attempt row + folder marker) commits in one transaction.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use gfiles_core::error::AppError;
use gfiles_core::result::AppResult;
use gfiles_core::types::pagination::{PageRequest, PageResponse};
use gfiles_database::repositories::contact::ContactRepository;
use gfiles_database::repositories::scan::ScanRepository;
use gfiles_database::repositories::sharing::SharingRepository;
use gfiles_database::repositories::user::UserRepository;
use gfiles_entity::scan::ScanResult;
use gfiles_entity::sharing::{
    CreateSharedItem, CreateSharingAttempt, ItemType, SharedItem, SharingType,
};

use crate::context::RequestContext;
use crate::notify::ShareEmailService;

use super::link::LinkService;

/// How long a scan result stays valid for compliance decisions.
pub const SCAN_FRESHNESS_WINDOW_HOURS: i64 = 24;

/// A share request as it enters the gate.
#[derive(Debug, Clone)]
pub struct ShareRequest {
    /// Path of the item to share.
    pub item_path: String,
    /// Name of the item to share.
    pub item_name: String,
    /// File or folder.
    pub item_type: ItemType,
    /// User or contact share.
    pub sharing_type: SharingType,
    /// Target user (user shares).
    pub shared_with_user_id: Option<Uuid>,
    /// Target contact (contact shares).
    pub shared_with_contact_id: Option<Uuid>,
    /// When the share expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share link expires (contact shares).
    pub share_link_expires_at: Option<DateTime<Utc>>,
    /// Permission: view.
    pub can_view: bool,
    /// Permission: download.
    pub can_download: bool,
    /// Permission: edit.
    pub can_edit: bool,
    /// Permission: delete.
    pub can_delete: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// The caller acknowledges a non-compliant share.
    pub user_acknowledged: bool,
    /// Justification for the acknowledgement.
    pub user_justification: Option<String>,
}

/// Outcome of the compliance check against the scan store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceCheck {
    /// Whether the share is GDPR-compliant as-is.
    pub gdpr_compliant: bool,
    /// Why the share is blocked, when it is.
    pub blocked_reason: Option<String>,
    /// A fresh scan is required and missing.
    pub scan_required: bool,
    /// A fresh scan existed for the item.
    pub scan_completed: bool,
    /// The scan consulted, if any.
    pub scan_result_id: Option<Uuid>,
}

/// A blocked share, returned to the caller with acknowledgement guidance.
#[derive(Debug, Clone)]
pub struct BlockedShare {
    /// Why the share was blocked.
    pub blocked_reason: String,
    /// A fresh scan is required and missing.
    pub scan_required: bool,
}

/// Terminal outcome of one gate invocation.
#[derive(Debug, Clone)]
pub enum ShareOutcome {
    /// The share was authorized and persisted.
    Authorized(SharedItem),
    /// The share was blocked; an attempt row was persisted.
    Blocked(BlockedShare),
}

/// Evaluate the compliance rules for one item against its latest scan.
///
/// Folder shares skip the check entirely: folders are provisioned
/// per-department on the CDN and are not scanned here. Do not extend this
/// to recursive folder scanning without revisiting the stored contract.
pub fn evaluate_compliance(
    item_type: ItemType,
    scan: Option<&ScanResult>,
    now: DateTime<Utc>,
) -> ComplianceCheck {
    if item_type == ItemType::Folder {
        return ComplianceCheck {
            gdpr_compliant: true,
            blocked_reason: None,
            scan_required: false,
            scan_completed: false,
            scan_result_id: None,
        };
    }

    let fresh = scan.filter(|s| s.is_fresh(now, Duration::hours(SCAN_FRESHNESS_WINDOW_HOURS)));

    match fresh {
        None => ComplianceCheck {
            gdpr_compliant: false,
            blocked_reason: Some(
                "File requires a personal-data scan before it can be shared".to_string(),
            ),
            scan_required: true,
            scan_completed: false,
            scan_result_id: None,
        },
        Some(scan) if scan.has_personal_data => ComplianceCheck {
            gdpr_compliant: false,
            blocked_reason: Some(format!(
                "File contains personal data (risk: {}, detected: {})",
                scan.risk_level.as_str(),
                scan.personal_data_types.join(", ")
            )),
            scan_required: false,
            scan_completed: true,
            scan_result_id: Some(scan.id),
        },
        Some(scan) => ComplianceCheck {
            gdpr_compliant: true,
            blocked_reason: None,
            scan_required: false,
            scan_completed: true,
            scan_result_id: Some(scan.id),
        },
    }
}

/// The sharing authorization gate.
#[derive(Debug, Clone)]
pub struct SharingGateService {
    /// Sharing repository (items, attempts, markers).
    sharing_repo: Arc<SharingRepository>,
    /// Scan result store.
    scan_repo: Arc<ScanRepository>,
    /// User directory for target resolution.
    user_repo: Arc<UserRepository>,
    /// Contact directory for target resolution.
    contact_repo: Arc<ContactRepository>,
    /// Link service for contact share tokens.
    link_service: Arc<LinkService>,
    /// Notification dispatcher for contact shares.
    email_service: Arc<ShareEmailService>,
}

impl SharingGateService {
    /// Creates a new sharing gate.
    pub fn new(
        sharing_repo: Arc<SharingRepository>,
        scan_repo: Arc<ScanRepository>,
        user_repo: Arc<UserRepository>,
        contact_repo: Arc<ContactRepository>,
        link_service: Arc<LinkService>,
        email_service: Arc<ShareEmailService>,
    ) -> Self {
        Self {
            sharing_repo,
            scan_repo,
            user_repo,
            contact_repo,
            link_service,
            email_service,
        }
    }

    /// Run one share request through the gate.
    ///
    /// Always persists a [`gfiles_entity::sharing::SharingAttempt`]; creates
    /// a [`SharedItem`] only when the request is compliant or the block was
    /// acknowledged with a justification. The attempt row retains the
    /// original compliance verdict so overrides stay visible in audit data.
    pub async fn authorize_share(
        &self,
        ctx: &RequestContext,
        mut req: ShareRequest,
    ) -> AppResult<ShareOutcome> {
        self.validate(&req)?;

        // Exactly one target field per sharing type; drop the other even
        // if the caller sent both.
        match req.sharing_type {
            SharingType::User => req.shared_with_contact_id = None,
            SharingType::Contact => req.shared_with_user_id = None,
        }

        self.resolve_target(&req).await?;

        let latest_scan = match req.item_type {
            ItemType::File => self.scan_repo.find_latest_for_path(&req.item_path).await?,
            ItemType::Folder => None,
        };
        let check = evaluate_compliance(req.item_type, latest_scan.as_ref(), Utc::now());

        if !check.gdpr_compliant && !req.user_acknowledged {
            let blocked_reason = check
                .blocked_reason
                .clone()
                .unwrap_or_else(|| "Share is not GDPR-compliant".to_string());

            self.sharing_repo
                .log_attempt(&self.attempt_from(ctx, &req, &check))
                .await?;

            info!(
                user_id = %ctx.user_id,
                item_path = %req.item_path,
                reason = %blocked_reason,
                "Share blocked by GDPR gate"
            );

            return Ok(ShareOutcome::Blocked(BlockedShare {
                blocked_reason,
                scan_required: check.scan_required,
            }));
        }

        let share_link = match req.sharing_type {
            SharingType::Contact => Some(self.link_service.generate_token()),
            SharingType::User => None,
        };

        let item = CreateSharedItem {
            item_path: req.item_path.clone(),
            item_name: req.item_name.clone(),
            item_type: req.item_type,
            shared_by: ctx.user_id,
            sharing_type: req.sharing_type,
            shared_with_user_id: req.shared_with_user_id,
            shared_with_contact_id: req.shared_with_contact_id,
            share_link,
            expires_at: req.expires_at,
            share_link_expires_at: req.share_link_expires_at,
            can_view: req.can_view,
            can_download: req.can_download,
            can_edit: req.can_edit,
            can_delete: req.can_delete,
            description: req.description.clone(),
        };

        let (created, _attempt) = self
            .sharing_repo
            .record_authorized_share(&self.attempt_from(ctx, &req, &check), &item)
            .await?;

        info!(
            user_id = %ctx.user_id,
            share_id = %created.id,
            item_path = %created.item_path,
            gdpr_compliant = check.gdpr_compliant,
            acknowledged = req.user_acknowledged,
            "Share authorized"
        );

        // Courtesy email after commit; the share is the source of truth
        // and a mail failure must not undo it.
        if created.sharing_type == SharingType::Contact {
            if let Err(e) = self.email_service.notify_contact(&created).await {
                warn!(share_id = %created.id, error = %e, "Share notification failed");
            }
        }

        Ok(ShareOutcome::Authorized(created))
    }

    /// List shares created by the current user.
    pub async fn list_shared_by_me(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<SharedItem>> {
        self.sharing_repo.find_shared_by(ctx.user_id, &page).await
    }

    /// List shares targeted at the current user.
    pub async fn list_shared_with_me(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<SharedItem>> {
        self.sharing_repo.find_shared_with(ctx.user_id, &page).await
    }

    fn validate(&self, req: &ShareRequest) -> AppResult<()> {
        if req.item_path.trim().is_empty() {
            return Err(AppError::validation("item_path is required"));
        }
        if req.item_name.trim().is_empty() {
            return Err(AppError::validation("item_name is required"));
        }
        match req.sharing_type {
            SharingType::User if req.shared_with_user_id.is_none() => {
                return Err(AppError::validation(
                    "shared_with_user_id is required for user shares",
                ));
            }
            SharingType::Contact if req.shared_with_contact_id.is_none() => {
                return Err(AppError::validation(
                    "shared_with_contact_id is required for contact shares",
                ));
            }
            _ => {}
        }
        if req.user_acknowledged
            && req
                .user_justification
                .as_deref()
                .is_none_or(|j| j.trim().is_empty())
        {
            return Err(AppError::validation(
                "user_justification is required when acknowledging a non-compliant share",
            ));
        }
        Ok(())
    }

    async fn resolve_target(&self, req: &ShareRequest) -> AppResult<()> {
        match (req.sharing_type, req.shared_with_user_id, req.shared_with_contact_id) {
            (SharingType::User, Some(user_id), _) => {
                self.user_repo
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Target user {user_id} not found")))?;
            }
            (SharingType::Contact, _, Some(contact_id)) => {
                self.contact_repo.find_by_id(contact_id).await?.ok_or_else(|| {
                    AppError::not_found(format!("Target contact {contact_id} not found"))
                })?;
            }
            _ => {
                return Err(AppError::validation("Share target is missing"));
            }
        }
        Ok(())
    }

    fn attempt_from(
        &self,
        ctx: &RequestContext,
        req: &ShareRequest,
        check: &ComplianceCheck,
    ) -> CreateSharingAttempt {
        CreateSharingAttempt {
            user_id: ctx.user_id,
            item_path: req.item_path.clone(),
            item_name: req.item_name.clone(),
            item_type: req.item_type,
            sharing_type: req.sharing_type,
            shared_with_user_id: req.shared_with_user_id,
            shared_with_contact_id: req.shared_with_contact_id,
            gdpr_compliant: check.gdpr_compliant,
            blocked_reason: check.blocked_reason.clone(),
            scan_required: check.scan_required,
            scan_completed: check.scan_completed,
            user_acknowledged: req.user_acknowledged,
            user_justification: req.user_justification.clone(),
            scan_result_id: check.scan_result_id,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfiles_entity::scan::RiskLevel;

    fn scan_result(
        scanned_hours_ago: i64,
        has_personal_data: bool,
        risk_level: RiskLevel,
        types: &[&str],
    ) -> ScanResult {
        ScanResult {
            id: Uuid::new_v4(),
            file_path: "/docs/a.pdf".into(),
            file_name: "a.pdf".into(),
            scan_date: Utc::now() - Duration::hours(scanned_hours_ago),
            has_personal_data,
            personal_data_types: types.iter().map(|s| s.to_string()).collect(),
            risk_level,
            file_type: Some("pdf".into()),
            file_size: 1024,
            scan_duration_ms: 12,
            scan_errors: None,
        }
    }

    #[test]
    fn test_file_without_scan_requires_scan() {
        let check = evaluate_compliance(ItemType::File, None, Utc::now());
        assert!(!check.gdpr_compliant);
        assert!(check.scan_required);
        assert!(!check.scan_completed);
        assert!(check.blocked_reason.is_some());
    }

    #[test]
    fn test_stale_scan_counts_as_missing() {
        let scan = scan_result(25, false, RiskLevel::Low, &[]);
        let check = evaluate_compliance(ItemType::File, Some(&scan), Utc::now());
        assert!(!check.gdpr_compliant);
        assert!(check.scan_required);
        assert_eq!(check.scan_result_id, None);
    }

    #[test]
    fn test_fresh_flagged_scan_blocks_with_details() {
        let scan = scan_result(1, true, RiskLevel::High, &["email", "tax-id"]);
        let check = evaluate_compliance(ItemType::File, Some(&scan), Utc::now());
        assert!(!check.gdpr_compliant);
        assert!(!check.scan_required);
        assert!(check.scan_completed);
        assert_eq!(check.scan_result_id, Some(scan.id));
        let reason = check.blocked_reason.unwrap();
        assert!(reason.contains("high"));
        assert!(reason.contains("email, tax-id"));
    }

    #[test]
    fn test_fresh_clean_scan_is_compliant() {
        let scan = scan_result(1, false, RiskLevel::Low, &[]);
        let check = evaluate_compliance(ItemType::File, Some(&scan), Utc::now());
        assert!(check.gdpr_compliant);
        assert!(check.scan_completed);
        assert_eq!(check.blocked_reason, None);
    }

    #[test]
    fn test_folder_shares_skip_the_check() {
        let flagged = scan_result(1, true, RiskLevel::Critical, &["iban"]);
        let check = evaluate_compliance(ItemType::Folder, Some(&flagged), Utc::now());
        assert!(check.gdpr_compliant);
        assert!(!check.scan_required);
        assert!(!check.scan_completed);
        assert_eq!(check.scan_result_id, None);
    }
}

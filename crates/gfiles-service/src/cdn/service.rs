//! Bulk CDN folder provisioning for departments and users.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gfiles_core::error::AppError;
use gfiles_core::result::AppResult;
use gfiles_database::repositories::department::DepartmentRepository;
use gfiles_database::repositories::user::UserRepository;
use gfiles_storage::CdnStorage;

use crate::context::RequestContext;

/// Folder name for users without a department.
const UNASSIGNED_FOLDER: &str = "unassigned";

/// Result of one folder creation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderProvisionResult {
    /// Path that was attempted.
    pub path: String,
    /// Whether the creation succeeded.
    pub success: bool,
    /// Error message when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one provisioning run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionSummary {
    /// Per-folder results, in creation order.
    pub results: Vec<FolderProvisionResult>,
    /// Number of folders created.
    pub created: usize,
    /// Number of folders that failed.
    pub failed: usize,
}

impl ProvisionSummary {
    /// Whether every folder failed.
    pub fn all_failed(&self) -> bool {
        self.created == 0 && self.failed > 0
    }

    /// Whether some folders failed but not all.
    pub fn partially_failed(&self) -> bool {
        self.created > 0 && self.failed > 0
    }
}

/// Provisions the CDN folder tree: one folder per department, one per
/// user underneath their department.
#[derive(Debug)]
pub struct CdnProvisioningService {
    /// CDN storage zone.
    storage: Arc<dyn CdnStorage>,
    /// User directory.
    user_repo: Arc<UserRepository>,
    /// Department directory.
    department_repo: Arc<DepartmentRepository>,
}

impl CdnProvisioningService {
    /// Creates a new provisioning service.
    pub fn new(
        storage: Arc<dyn CdnStorage>,
        user_repo: Arc<UserRepository>,
        department_repo: Arc<DepartmentRepository>,
    ) -> Self {
        Self {
            storage,
            user_repo,
            department_repo,
        }
    }

    /// Create folders for every department and every active user.
    ///
    /// Failures are collected per item rather than aborting the run, so
    /// the caller can see exactly which folders need attention.
    pub async fn generate_folders(&self, ctx: &RequestContext) -> AppResult<ProvisionSummary> {
        let departments = self.department_repo.find_all().await?;
        let users = self.user_repo.find_all_active().await?;

        if departments.is_empty() && users.is_empty() {
            return Err(AppError::validation(
                "No departments or users to provision folders for",
            ));
        }

        let dept_codes: HashMap<Uuid, String> = departments
            .iter()
            .map(|d| (d.id, d.code.clone()))
            .collect();

        let mut paths: Vec<String> = departments.iter().map(|d| d.code.clone()).collect();
        for user in &users {
            let prefix = user
                .department_id
                .and_then(|id| dept_codes.get(&id))
                .map(String::as_str)
                .unwrap_or(UNASSIGNED_FOLDER);
            paths.push(format!("{prefix}/{}", user.username));
        }

        let mut results = Vec::with_capacity(paths.len());
        let mut created = 0;
        let mut failed = 0;
        for path in paths {
            match self.storage.create_folder(&path).await {
                Ok(()) => {
                    created += 1;
                    results.push(FolderProvisionResult {
                        path,
                        success: true,
                        error: None,
                    });
                }
                Err(e) => {
                    failed += 1;
                    results.push(FolderProvisionResult {
                        path,
                        success: false,
                        error: Some(e.message.clone()),
                    });
                }
            }
        }

        info!(
            user_id = %ctx.user_id,
            created,
            failed,
            "CDN folder provisioning finished"
        );

        Ok(ProvisionSummary {
            results,
            created,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_failure_classification() {
        let all_failed = ProvisionSummary {
            results: vec![],
            created: 0,
            failed: 3,
        };
        assert!(all_failed.all_failed());
        assert!(!all_failed.partially_failed());

        let partial = ProvisionSummary {
            results: vec![],
            created: 2,
            failed: 1,
        };
        assert!(!partial.all_failed());
        assert!(partial.partially_failed());

        let clean = ProvisionSummary {
            results: vec![],
            created: 3,
            failed: 0,
        };
        assert!(!clean.all_failed());
        assert!(!clean.partially_failed());
    }
}

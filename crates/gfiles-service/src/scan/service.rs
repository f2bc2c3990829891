//! Scan service.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use gfiles_core::result::AppResult;
use gfiles_database::repositories::scan::ScanRepository;
use gfiles_entity::scan::{CreateScanResult, ScanResult};
use gfiles_scanner::{PersonalDataScanner, ScanInput};

use crate::context::RequestContext;

/// A request to scan one file.
#[derive(Debug, Clone)]
pub struct ScanFileRequest {
    /// Path of the file.
    pub file_path: String,
    /// File name.
    pub file_name: String,
    /// File type / extension, if known.
    pub file_type: Option<String>,
    /// Decoded text content; `None` when the content could not be read.
    pub content: Option<String>,
    /// File size in bytes.
    pub file_size: i64,
}

/// Runs the personal-data scanner and persists each result as a new
/// immutable scan row.
#[derive(Debug)]
pub struct ScanService {
    /// The pattern scanner.
    scanner: PersonalDataScanner,
    /// Scan result store.
    scan_repo: Arc<ScanRepository>,
}

impl ScanService {
    /// Creates a new scan service.
    pub fn new(scan_repo: Arc<ScanRepository>) -> Self {
        Self {
            scanner: PersonalDataScanner::new(),
            scan_repo,
        }
    }

    /// Scan a file and store the classification.
    pub async fn scan_and_store(
        &self,
        ctx: &RequestContext,
        req: ScanFileRequest,
    ) -> AppResult<ScanResult> {
        let started = Instant::now();
        let classification = self.scanner.scan(&ScanInput {
            file_path: &req.file_path,
            file_name: &req.file_name,
            file_type: req.file_type.as_deref(),
            content: req.content.as_deref(),
        });
        let scan_duration_ms = started.elapsed().as_millis() as i64;

        let scan_errors = if classification.errors.is_empty() {
            None
        } else {
            Some(classification.errors.join("; "))
        };

        let result = self
            .scan_repo
            .create(&CreateScanResult {
                file_path: req.file_path,
                file_name: req.file_name,
                has_personal_data: classification.has_personal_data,
                personal_data_types: classification
                    .personal_data_types
                    .iter()
                    .map(|t| t.as_str().to_string())
                    .collect(),
                risk_level: classification.risk_level,
                file_type: req.file_type,
                file_size: req.file_size,
                scan_duration_ms,
                scan_errors,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_path = %result.file_path,
            risk_level = %result.risk_level.as_str(),
            has_personal_data = result.has_personal_data,
            "File scanned"
        );

        Ok(result)
    }
}

//! GDPR report and scan handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use gfiles_core::error::AppError;
use gfiles_service::scan::ScanFileRequest;

use crate::dto::request::{GenerateReportRequest, ScanFileApiRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac::require_manager;
use crate::state::AppState;

/// POST /api/gdpr/reports
pub async fn generate_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_manager(&auth)?;

    let start = req
        .start_date
        .ok_or_else(|| AppError::validation("startDate is required"))?;
    let end = req
        .end_date
        .ok_or_else(|| AppError::validation("endDate is required"))?;

    let report = state.report_service.generate(auth.user_id, start, end).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": report })))
}

/// GET /api/gdpr/reports
pub async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_manager(&auth)?;

    let result = state
        .report_service
        .list(params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/gdpr/scan
pub async fn scan_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ScanFileApiRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .scan_service
        .scan_and_store(
            &auth,
            ScanFileRequest {
                file_path: req.file_path,
                file_name: req.file_name,
                file_type: req.file_type,
                content: req.content,
                file_size: req.file_size,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

//! Sharing gate and share listing handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use validator::Validate;

use gfiles_core::error::AppError;
use gfiles_entity::sharing::{ItemType, SharingType};
use gfiles_service::sharing::{ShareOutcome, ShareRequest};

use crate::dto::request::{CreateShareRequest, SendShareEmailRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for share listing. Pagination fields are repeated
/// here rather than flattened: serde's flatten routes query values
/// through an untyped buffer that cannot parse numbers.
#[derive(Debug, Deserialize)]
pub struct ListSharesParams {
    /// `shared-by-me` or `shared-with-me`.
    #[serde(rename = "type")]
    pub list_type: String,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// POST /api/sharing
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let item_type = parse_item_type(&req.item_type)?;
    let sharing_type = parse_sharing_type(&req.sharing_type)?;

    let outcome = state
        .sharing_gate
        .authorize_share(
            &auth,
            ShareRequest {
                item_path: req.item_path,
                item_name: req.item_name,
                item_type,
                sharing_type,
                shared_with_user_id: req.shared_with_user_id,
                shared_with_contact_id: req.shared_with_contact_id,
                expires_at: req.expires_at,
                share_link_expires_at: req.share_link_expires_at,
                can_view: req.can_view,
                can_download: req.can_download,
                can_edit: req.can_edit,
                can_delete: req.can_delete,
                description: req.description,
                user_acknowledged: req.user_acknowledged,
                user_justification: req.user_justification,
            },
        )
        .await?;

    match outcome {
        ShareOutcome::Authorized(item) => {
            Ok(Json(serde_json::json!({ "success": true, "data": item })).into_response())
        }
        // A compliance block is a modeled gate outcome, not an
        // authorization error: the body tells the caller how to proceed.
        ShareOutcome::Blocked(blocked) => Ok((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "success": false,
                "gdprCompliant": false,
                "scanRequired": blocked.scan_required,
                "requiresAcknowledgment": true,
                "blockedReason": blocked.blocked_reason,
            })),
        )
            .into_response()),
    }
}

/// GET /api/sharing?type=shared-by-me|shared-with-me
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListSharesParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = PaginationParams {
        page: params.page,
        page_size: params.page_size,
    }
    .into_page_request();
    let result = match params.list_type.as_str() {
        "shared-by-me" => state.sharing_gate.list_shared_by_me(&auth, page).await?,
        "shared-with-me" => state.sharing_gate.list_shared_with_me(&auth, page).await?,
        other => {
            return Err(AppError::validation(format!(
                "Invalid share list type: '{other}'. Expected shared-by-me or shared-with-me"
            ))
            .into());
        }
    };

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/sharing/send-email
pub async fn send_share_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendShareEmailRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share_url = state
        .share_email_service
        .send_share_email(&auth, req.shared_item_id, req.contact_id)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "shareUrl": share_url }
    })))
}

fn parse_item_type(s: &str) -> Result<ItemType, AppError> {
    match s {
        "file" => Ok(ItemType::File),
        "folder" => Ok(ItemType::Folder),
        _ => Err(AppError::validation(format!("Invalid item type: {s}"))),
    }
}

fn parse_sharing_type(s: &str) -> Result<SharingType, AppError> {
    match s {
        "user" => Ok(SharingType::User),
        "contact" => Ok(SharingType::Contact),
        _ => Err(AppError::validation(format!("Invalid sharing type: {s}"))),
    }
}

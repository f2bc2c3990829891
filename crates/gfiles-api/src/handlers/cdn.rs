//! CDN directory and provisioning handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use gfiles_core::error::ErrorKind;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// Query parameters for directory listing.
#[derive(Debug, Deserialize)]
pub struct ListDirectoryParams {
    /// Directory path within the storage zone; root when omitted.
    #[serde(default)]
    pub path: String,
}

/// GET /api/cdn?path=
pub async fn list_directory(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListDirectoryParams>,
) -> Result<Response, ApiError> {
    match state.cdn_storage.list(&params.path).await {
        Ok(entries) => {
            Ok(Json(serde_json::json!({ "success": true, "data": entries })).into_response())
        }
        // Unknown paths come back with a parent-directory suggestion so
        // the file browser can recover instead of dead-ending.
        Err(e) if e.kind == ErrorKind::NotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "success": false,
                "error": "NOT_FOUND",
                "message": e.message,
                "suggestion": { "parentPath": parent_path(&params.path) },
            })),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/cdn/generate-folders
pub async fn generate_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    require_admin(&auth)?;

    let summary = state.cdn_provisioning.generate_folders(&auth).await?;

    let status = if summary.all_failed() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else if summary.partially_failed() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };

    let body = serde_json::json!({
        "success": summary.failed == 0,
        "data": summary,
    });

    Ok((status, Json(body)).into_response())
}

/// Parent of a zone path, for the not-found suggestion payload.
fn parent_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("sales/anna/reports"), "sales/anna");
        assert_eq!(parent_path("/sales/"), "");
        assert_eq!(parent_path(""), "");
    }
}

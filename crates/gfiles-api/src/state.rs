//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use gfiles_auth::jwt::decoder::JwtDecoder;
use gfiles_auth::jwt::encoder::JwtEncoder;
use gfiles_auth::password::hasher::PasswordHasher;
use gfiles_core::config::AppConfig;
use gfiles_storage::CdnStorage;

use gfiles_database::repositories::user::UserRepository;

use gfiles_service::cdn::CdnProvisioningService;
use gfiles_service::notify::ShareEmailService;
use gfiles_service::report::ReportService;
use gfiles_service::scan::ScanService;
use gfiles_service::sharing::SharingGateService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// CDN storage zone
    pub cdn_storage: Arc<dyn CdnStorage>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2id)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Sharing authorization gate
    pub sharing_gate: Arc<SharingGateService>,
    /// Scan orchestration service
    pub scan_service: Arc<ScanService>,
    /// Report generation service
    pub report_service: Arc<ReportService>,
    /// Share notification service
    pub share_email_service: Arc<ShareEmailService>,
    /// CDN folder provisioning service
    pub cdn_provisioning: Arc<CdnProvisioningService>,
}

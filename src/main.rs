//! G-FILES Server — business file sharing with a GDPR compliance gate.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use gfiles_core::config::AppConfig;
use gfiles_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("GFILES_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting G-FILES v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = gfiles_database::DatabasePool::connect(&config.database).await?;
    gfiles_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(gfiles_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let department_repo = Arc::new(
        gfiles_database::repositories::department::DepartmentRepository::new(db_pool.clone()),
    );
    let contact_repo = Arc::new(
        gfiles_database::repositories::contact::ContactRepository::new(db_pool.clone()),
    );
    let scan_repo = Arc::new(gfiles_database::repositories::scan::ScanRepository::new(
        db_pool.clone(),
    ));
    let sharing_repo = Arc::new(
        gfiles_database::repositories::sharing::SharingRepository::new(db_pool.clone()),
    );
    let report_repo = Arc::new(gfiles_database::repositories::report::ReportRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let password_hasher = Arc::new(gfiles_auth::password::hasher::PasswordHasher::new());
    let jwt_encoder = Arc::new(gfiles_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(gfiles_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 4: External integrations ────────────────────────────
    let cdn_storage: Arc<dyn gfiles_storage::CdnStorage> =
        Arc::new(gfiles_storage::CdnStorageClient::new(config.cdn.clone())?);
    let mailer: Arc<dyn gfiles_notify::Mailer> =
        Arc::new(gfiles_notify::SmtpMailer::new(&config.mail)?);

    // ── Step 5: Services ─────────────────────────────────────────
    let link_service = Arc::new(gfiles_service::sharing::LinkService::new());
    let share_email_service = Arc::new(gfiles_service::notify::ShareEmailService::new(
        Arc::clone(&sharing_repo),
        Arc::clone(&contact_repo),
        Arc::clone(&mailer),
        config.mail.clone(),
    ));
    let sharing_gate = Arc::new(gfiles_service::sharing::SharingGateService::new(
        Arc::clone(&sharing_repo),
        Arc::clone(&scan_repo),
        Arc::clone(&user_repo),
        Arc::clone(&contact_repo),
        Arc::clone(&link_service),
        Arc::clone(&share_email_service),
    ));
    let scan_service = Arc::new(gfiles_service::scan::ScanService::new(Arc::clone(
        &scan_repo,
    )));
    let report_service = Arc::new(gfiles_service::report::ReportService::new(
        Arc::clone(&sharing_repo),
        Arc::clone(&scan_repo),
        Arc::clone(&report_repo),
    ));
    let cdn_provisioning = Arc::new(gfiles_service::cdn::CdnProvisioningService::new(
        Arc::clone(&cdn_storage),
        Arc::clone(&user_repo),
        Arc::clone(&department_repo),
    ));

    // ── Step 6: Background worker ────────────────────────────────
    let _scheduler = if config.worker.enabled {
        let mut executor = gfiles_worker::JobExecutor::new();
        executor.register(Arc::new(
            gfiles_worker::jobs::report::ComplianceReportJobHandler::new(Arc::clone(
                &report_service,
            )),
        ));
        let executor = Arc::new(executor);

        let scheduler = gfiles_worker::CronScheduler::new(Arc::clone(&executor)).await?;
        scheduler.register_default_tasks(&config.worker).await?;
        scheduler.start().await?;
        tracing::info!("Background worker started");
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = gfiles_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        cdn_storage,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        sharing_gate,
        scan_service,
        report_service,
        share_email_service,
        cdn_provisioning,
    };

    let app = gfiles_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("G-FILES server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("G-FILES server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

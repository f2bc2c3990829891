//! Route definitions for the G-FILES HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(sharing_routes())
        .merge(gdpr_routes())
        .merge(cdn_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Sharing gate, listing, and notification
fn sharing_routes() -> Router<AppState> {
    Router::new()
        .route("/sharing", post(handlers::sharing::create_share))
        .route("/sharing", get(handlers::sharing::list_shares))
        .route(
            "/sharing/send-email",
            post(handlers::sharing::send_share_email),
        )
}

/// GDPR reports and scanning
fn gdpr_routes() -> Router<AppState> {
    Router::new()
        .route("/gdpr/reports", post(handlers::gdpr::generate_report))
        .route("/gdpr/reports", get(handlers::gdpr::list_reports))
        .route("/gdpr/scan", post(handlers::gdpr::scan_file))
}

/// CDN directory listing and folder provisioning
fn cdn_routes() -> Router<AppState> {
    Router::new()
        .route("/cdn", get(handlers::cdn::list_directory))
        .route(
            "/cdn/generate-folders",
            post(handlers::cdn::generate_folders),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);
    cors = cors.allow_headers(Any);
    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}

//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Largest accepted analysis payload.
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Industry configuration
        .route("/industries", get(handlers::list_industries))
        .route("/industries/{industry}/headers", post(handlers::resolve_headers))
        .route("/industries/{industry}/dashboard", post(handlers::render_dashboard))
        // Analysis storage
        .route(
            "/analyses",
            get(handlers::list_analyses).post(handlers::create_analysis),
        )
        .route(
            "/analyses/{file_id}",
            get(handlers::get_analysis)
                .put(handlers::store_analysis)
                .delete(handlers::delete_analysis),
        )
        .route(
            "/analyses/{file_id}/dashboard",
            get(handlers::get_analysis_dashboard),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::db::{AnalysisRepository, LocalRepository};
    use crate::services::DashboardEngine;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn AnalysisRepository>;
        let engine = DashboardEngine::new(Arc::new(DashboardConfig::builtin())).unwrap();
        let _router = create_router(AppState::new(repo, Arc::new(engine)));
    }
}

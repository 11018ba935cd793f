//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Upload & sessions
        .route("/statements", post(handlers::upload_statement))
        .route("/statements", get(handlers::list_sessions))
        .route("/statements/{session_id}", get(handlers::get_statement))
        .route("/statements/{session_id}", axum::routing::delete(handlers::delete_statement))
        // Review table
        .route("/statements/{session_id}/fields", get(handlers::get_fields))
        .route("/statements/{session_id}/fields", patch(handlers::edit_field))
        // Analytics & schedule
        .route("/statements/{session_id}/analytics", get(handlers::get_analytics))
        .route("/statements/{session_id}/schedule", get(handlers::get_schedule))
        .route("/statements/{session_id}/schedule/generate", post(handlers::generate_schedule))
        // Export
        .route("/statements/{session_id}/export", get(handlers::export_statement));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Above the 10 MB validation threshold so oversize uploads get the
        // documented file error instead of a bare 413.
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

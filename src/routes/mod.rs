//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/trials/specialty/{specialty}` - Trial search and triage
//! - `/health`, `/api/health` - Health checks

pub mod health;
pub mod trials;

use axum::Router;
use crate::middleware::cors::cors_layer;
use crate::models::AppState;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(trials::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

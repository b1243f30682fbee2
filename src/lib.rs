// Trial Scout - specialty-driven clinical trial discovery and triage

pub mod config;
pub mod models;
pub mod types;
pub mod specialty; // Specialty catalog and extraction schemas
pub mod search;    // Query planning and the external search provider
pub mod trials;    // Normalization, recruitment signals, insight guardrail
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use trials::{TrialRecord, TrialSearchResponse, TrialSearchService};
pub use types::{AppError, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}

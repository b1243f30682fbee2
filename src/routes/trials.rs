use axum::{
    Router,
    routing::get,
    Json,
    extract::{Path, State},
};
use crate::models::AppState;
use crate::trials::TrialSearchResponse;
use crate::types::AppResult;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/trials/specialty/{specialty}", get(trials_by_specialty))
        .with_state(state)
}

/// GET /api/trials/specialty/{specialty}
async fn trials_by_specialty(
    State(state): State<AppState>,
    Path(specialty): Path<String>,
) -> AppResult<Json<TrialSearchResponse>> {
    info!(specialty = %specialty, "Received trial search request");

    let service = state.trial_service()?;
    let response = service.search_by_specialty(&specialty).await?;

    Ok(Json(response))
}

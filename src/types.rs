// Error types shared across the crate

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid specialty. Must be one of: {0}")]
    InvalidSpecialty(String),

    #[error("Search provider not configured. Set EXA_API_KEY.")]
    ProviderNotConfigured,

    #[error("Search provider call failed: {0}")]
    ProviderCallFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ProviderCallFailed(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidSpecialty(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Invalid specialty",
                    "message": self.to_string(),
                }),
            ),
            AppError::ProviderNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": self.to_string() }),
            ),
            AppError::ProviderCallFailed(detail) => {
                error!(detail = %detail, "Search provider call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error": "Search failed",
                        "message": self.to_string(),
                    }),
                )
            }
            AppError::Config(_) | AppError::Internal(_) => {
                error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error": "Unexpected error",
                        "message": self.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn invalid_specialty_returns_400() {
        let response = AppError::InvalidSpecialty("oncology, neurology".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid specialty");
        assert_eq!(
            json["message"],
            "Invalid specialty. Must be one of: oncology, neurology"
        );
    }

    #[tokio::test]
    async fn missing_provider_returns_500() {
        let response = AppError::ProviderNotConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("EXA_API_KEY"));
    }

    #[tokio::test]
    async fn provider_failure_returns_500() {
        let response = AppError::ProviderCallFailed("status 502".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Search failed");
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Configuration Errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Page Session Errors
    #[error("Page session not found")]
    SessionNotFound,
    #[error("Event `{0}` is not handled by the active view")]
    UnsupportedEvent(String),

    // Rendering Errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Transport-level failures talking to the remote polls API. A non-success status is not an
/// error here; it comes back as `ApiOutcome::Failure`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_string = self.to_string();
        let (status, error_message) = match self {
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid Configuration")
            }
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "Page Session Not Found"),
            AppError::UnsupportedEvent(_) => (StatusCode::BAD_REQUEST, "Unsupported Page Event"),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Page Rendering Failed"),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "message": error_message,
            "error": error_string,
            "timestamp": chrono::Utc::now()
        }));

        (status, body).into_response()
    }
}

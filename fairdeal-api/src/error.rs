use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fairdeal_offer::OfferError;
use serde_json::json;

/// Client-facing body for every 500
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("internal error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<OfferError> for AppError {
    fn from(err: OfferError) -> Self {
        match err {
            OfferError::InvalidPlatform { .. } => AppError::ValidationError(err.to_string()),
        }
    }
}

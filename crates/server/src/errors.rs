use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::views::DomainErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Fixed client-facing text for any data file failure.
pub const STORAGE_ERROR_DETAIL: &str = "Error in reading the data";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Not-found or bad input, reported as `{status, code, message}`.
    #[error("{message}")]
    Domain { status: StatusCode, message: String, legacy: bool },
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn from_service(e: ServiceError, legacy: bool) -> Self {
        match e {
            ServiceError::Validation(message) => Self::Domain { status: StatusCode::BAD_REQUEST, message, legacy },
            ServiceError::NotFound(message) => Self::Domain { status: StatusCode::NOT_FOUND, message, legacy },
            ServiceError::StorageUnavailable(cause) => Self::Storage(cause),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain { status, message, legacy } => {
                let body = DomainErrorBody::new(status.as_u16(), message);
                let status = if legacy { StatusCode::OK } else { status };
                (status, Json(body)).into_response()
            }
            ApiError::Storage(cause) => {
                error!(error = %cause, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"detail": STORAGE_ERROR_DETAIL})),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

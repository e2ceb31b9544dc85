use shelf_core::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Core(#[from] CoreError),
}

impl ApiError {
    /// HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Core(e) => match e.kind() {
                ErrorKind::Validation | ErrorKind::InvalidFilter => 400,
                ErrorKind::NotFound => 404,
                ErrorKind::Conflict => 409,
                ErrorKind::Storage => 500,
            },
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Core(e) => match e.kind() {
                ErrorKind::Validation => "VALIDATION_ERROR",
                ErrorKind::InvalidFilter => "INVALID_FILTER",
                ErrorKind::NotFound => "NOT_FOUND",
                ErrorKind::Conflict => "CONFLICT",
                ErrorKind::Storage => "INTERNAL_ERROR",
            },
        }
    }
}

#[cfg(feature = "http")]
mod response {
    use axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use serde::Serialize;
    use tracing::error;

    use super::ApiError;

    #[derive(Debug, Serialize)]
    struct ErrorBody {
        code: &'static str,
        message: String,
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status =
                StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                error!(error = %self, "request failed");
            }

            let body = ErrorBody {
                code: self.code(),
                message: self.to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::cats::store::StoreError;
use crate::modules::storage::UploadError;
use crate::shared::types::ErrorResponse;

/// Message returned in place of raw store errors when details are hidden
pub const GENERIC_STORE_ERROR: &str = "Database error occurred";

/// Message returned when an uploaded file could not be written
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to store uploaded file";

#[derive(Debug, Error)]
pub enum AppError {
    /// Store failure. The message is sent to the client as-is.
    #[error("{0}")]
    Store(String),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a store failure, optionally hiding the underlying message
    pub fn from_store(err: StoreError, expose_details: bool) -> Self {
        tracing::error!("Store error: {:?}", err);
        if expose_details {
            AppError::Store(err.to_string())
        } else {
            AppError::Store(GENERIC_STORE_ERROR.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Upload(ref e) => {
                tracing::error!("Upload error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UPLOAD_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_store_error_leaks_message_when_exposed() {
        let err = AppError::from_store(StoreError::Unavailable("connection refused".into()), true);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Store unavailable: connection refused");
    }

    #[tokio::test]
    async fn test_store_error_hidden_when_not_exposed() {
        let err = AppError::from_store(StoreError::Unavailable("secret host".into()), false);
        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"], GENERIC_STORE_ERROR);
    }

    #[tokio::test]
    async fn test_upload_error_maps_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let response = AppError::Upload(UploadError::Io(io)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], UPLOAD_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_400() {
        let response = AppError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

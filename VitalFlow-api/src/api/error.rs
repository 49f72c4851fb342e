use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::entities::PublicErrorResponse;

/// Message returned for any failure the server cannot attribute to the caller
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误";

/// Errors surfaced to HTTP clients as `{ "message": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// The request body exceeds the configured limit
    #[error("请求体过大")]
    PayloadTooLarge,

    /// Unexpected server-side failure
    #[error("服务器内部错误")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(PublicErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_validation_error_response() {
        let response = ApiError::validation("readings 字段必须是非空数组").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: PublicErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.message, "readings 字段必须是非空数组");
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let response = ApiError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: PublicErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.message, INTERNAL_ERROR_MESSAGE);
    }
}

//! Unified error types for the item service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::envelope::Envelope;
use crate::metrics;
use crate::store::ItemId;

/// Message returned when a create request has no usable name.
pub const NAME_REQUIRED: &str = "Name is required";
/// Message returned when an item id does not resolve.
pub const ITEM_NOT_FOUND: &str = "Item not found";
/// Message returned by the catch-all route.
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";
/// Message returned for any unhandled failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
/// Message returned when a request body cannot be decoded.
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
/// Message returned when a request body exceeds the size limit.
pub const REQUEST_TOO_LARGE: &str = "Request body too large";

/// Process-level errors (startup, configuration, sockets).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the item store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Required input missing or malformed.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// No item with the given id.
    #[error("item {0} not found")]
    NotFound(ItemId),
}

/// Errors surfaced to HTTP clients as an error envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    /// 400, the message is echoed to the client.
    #[error("{0}")]
    Validation(String),

    /// 404 for a missing or unparseable item id.
    #[error("item not found")]
    ItemNotFound,

    /// 404 for an unmatched route.
    #[error("endpoint not found")]
    EndpointNotFound,

    /// 500, the detail is logged and never echoed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ItemNotFound | ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the envelope's `error` field.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg.as_str(),
            ApiError::ItemNotFound => ITEM_NOT_FOUND,
            ApiError::EndpointNotFound => ENDPOINT_NOT_FOUND,
            ApiError::Internal(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => ApiError::Validation(msg.to_string()),
            StoreError::NotFound(_) => ApiError::ItemNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "unhandled failure while serving request");
                metrics::inc_internal_errors();
            }
            ApiError::Validation(_) => metrics::inc_validation_failures(),
            ApiError::ItemNotFound | ApiError::EndpointNotFound => {}
        }

        let body = Envelope::<()>::error(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_errors() {
        let validation: ApiError = StoreError::Validation(NAME_REQUIRED).into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.public_message(), NAME_REQUIRED);

        let missing: ApiError = StoreError::NotFound(9999).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.public_message(), ITEM_NOT_FOUND);
    }

    #[test]
    fn internal_detail_is_not_public() {
        let err = ApiError::Internal("lock poisoned at store.rs:42".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn error_response_uses_envelope() {
        let response = ApiError::EndpointNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": ENDPOINT_NOT_FOUND})
        );
    }
}

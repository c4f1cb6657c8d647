//! Request extraction: item ids from the path and JSON bodies.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, INVALID_JSON_BODY, REQUEST_TOO_LARGE};
use crate::store::ItemId;

/// The `:id` path segment parsed as an item id.
///
/// Anything that is not an unsigned integer, including segments that do not
/// percent-decode to UTF-8, cannot name an item and is rejected as not found.
/// Being a parts extractor it runs before any body extractor, so a bad id
/// wins over a bad body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemIdPath(pub ItemId);

#[async_trait]
impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "rejecting item id");
                ApiError::ItemNotFound
            })?;

        parse_id(&raw).map(ItemIdPath)
    }
}

fn parse_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse().map_err(|_| ApiError::ItemNotFound)
}

/// JSON object body decoded into a request schema.
///
/// Unlike `axum::Json` the `Content-Type` header is not required, and an
/// empty body decodes as `T::default()`. Anything that is not a JSON object
/// matching `T` is rejected with a 400 envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                debug!(reason = %rejection.body_text(), "rejecting request body");
                ApiError::Validation(REQUEST_TOO_LARGE.to_string())
            } else {
                ApiError::Internal(format!("failed to read request body: {}", rejection.body_text()))
            }
        })?;

        decode(&bytes).map(JsonBody)
    }
}

fn decode<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let invalid = |reason: String| {
        debug!(%reason, "rejecting request body");
        ApiError::Validation(INVALID_JSON_BODY.to_string())
    };

    let value: Value = serde_json::from_slice(bytes).map_err(|e| invalid(e.to_string()))?;
    if !value.is_object() {
        return Err(invalid("body is not a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

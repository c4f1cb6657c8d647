//! HTTP API handlers.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;

use super::envelope::Envelope;
use super::extract::{ItemIdPath, JsonBody};
use crate::error::ApiError;
use crate::metrics;
use crate::status::{BuildInfo, HealthReport, ReadyReport, StatusReporter};
use crate::store::{Item, ItemPatch, ItemStore, NewItem, SharedStore};

/// Message returned after a successful delete.
pub const ITEM_DELETED: &str = "Item deleted";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The item store; the only path to it is through these handlers.
    pub store: SharedStore,
    /// Health, readiness and version reporter.
    pub status: Arc<StatusReporter>,
    /// Prometheus exposition handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store and reporter.
    pub fn new(store: ItemStore, status: StatusReporter) -> Self {
        Self {
            store: store.into_shared(),
            status: Arc::new(status),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `GET /metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

// === Status ===

/// Liveness check - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses((status = 200, description = "Process is alive", body = HealthReport))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.status.health())
}

/// Readiness check - unconditional, there are no dependencies to check.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "status",
    responses((status = 200, description = "Process accepts traffic", body = ReadyReport))
)]
pub async fn ready(State(state): State<AppState>) -> Json<ReadyReport> {
    Json(state.status.ready())
}

/// Build metadata captured at startup.
#[utoipa::path(
    get,
    path = "/version",
    tag = "status",
    responses((status = 200, description = "Build and version metadata", body = BuildInfo))
)]
pub async fn version(State(state): State<AppState>) -> Json<BuildInfo> {
    Json(state.status.version().clone())
}

/// Prometheus text exposition.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => ApiError::EndpointNotFound.into_response(),
    }
}

// === Items ===

/// List all items in insertion order.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses((status = 200, description = "All items in `data`, with `count`", body = [Item]))
)]
pub async fn list_items(State(state): State<AppState>) -> Json<Envelope<Vec<Item>>> {
    let store = state.store.read().await;
    Json(Envelope::list(store.list_all().to_vec()))
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id; non-integer values are not found")),
    responses(
        (status = 200, description = "The item in `data`", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<Json<Envelope<Item>>, ApiError> {
    let store = state.store.read().await;
    let item = store.get_by_id(id)?.clone();
    Ok(Json(Envelope::data(item)))
}

/// Create an item; the store assigns its id.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Created item in `data`", body = Item),
        (status = 400, description = "Name is required, or the body is not valid JSON")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewItem>,
) -> Result<(StatusCode, Json<Envelope<Item>>), ApiError> {
    let mut store = state.store.write().await;
    let item = store.create(new)?;

    metrics::inc_items_created();
    metrics::set_items_stored(store.len());
    Ok((StatusCode::CREATED, Json(Envelope::data(item))))
}

/// Apply a partial update.
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Updated item in `data`", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    JsonBody(patch): JsonBody<ItemPatch>,
) -> Result<Json<Envelope<Item>>, ApiError> {
    let item = state.store.write().await.update(id, patch)?;

    metrics::inc_items_updated();
    Ok(Json(Envelope::data(item)))
}

/// Delete an item. Its id is never issued again.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<Json<Envelope<()>>, ApiError> {
    let mut store = state.store.write().await;
    store.delete(id)?;

    metrics::inc_items_deleted();
    metrics::set_items_stored(store.len());
    Ok(Json(Envelope::message(ITEM_DELETED)))
}

// === Fallbacks ===

/// Catch-all for unmatched paths and unsupported verbs.
pub async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}

/// Convert a handler panic into the generic 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

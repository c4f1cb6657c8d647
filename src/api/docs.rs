//! OpenAPI description of the HTTP surface.

use axum::Json;
use utoipa::OpenApi;

use super::handlers;
use crate::status::{BuildInfo, HealthReport, ReadyReport, ServiceStatus};
use crate::store::{Item, ItemPatch, NewItem};

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "item-service",
        description = "In-memory item CRUD with health, readiness and version endpoints"
    ),
    paths(
        handlers::health,
        handlers::ready,
        handlers::version,
        handlers::list_items,
        handlers::get_item,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item,
    ),
    components(schemas(
        Item, NewItem, ItemPatch, HealthReport, ReadyReport, BuildInfo, ServiceStatus
    )),
    tags(
        (name = "items", description = "Item CRUD, also mounted under /api"),
        (name = "status", description = "Liveness, readiness and build metadata")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

//! HTTP API route definitions.
//!
//! Route table, in evaluation order:
//!
//! | Verb | Path | Handler |
//! |---|---|---|
//! | GET | `/health` | [`health`] |
//! | GET | `/ready` | [`ready`] |
//! | GET | `/version` | [`version`] |
//! | GET | `/metrics` | [`render_metrics`] |
//! | GET | `/openapi.json` | [`openapi`] |
//! | GET, POST | `/items` | [`list_items`], [`create_item`] |
//! | GET, PUT, DELETE | `/items/:id` | [`get_item`], [`update_item`], [`delete_item`] |
//! | same as above | `/api/items`, `/api/items/:id` | same handlers, same store |
//! | anything else | | [`endpoint_not_found`] |
//!
//! A known path hit with an unsupported verb also falls through to
//! [`endpoint_not_found`] instead of producing a 405.

use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use super::docs::openapi;
use super::handlers::{
    create_item, delete_item, endpoint_not_found, get_item, handle_panic, health, list_items,
    ready, render_metrics, update_item, version, AppState,
};
use crate::metrics::track_requests;

/// Prefix under which the item routes are mounted a second time.
pub const API_PREFIX: &str = "/api";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status endpoints
        .route("/health", get(health).fallback(endpoint_not_found))
        .route("/ready", get(ready).fallback(endpoint_not_found))
        .route("/version", get(version).fallback(endpoint_not_found))
        .route("/metrics", get(render_metrics).fallback(endpoint_not_found))
        .route("/openapi.json", get(openapi).fallback(endpoint_not_found))
        // Item endpoints
        .merge(item_routes())
        .nest(API_PREFIX, item_routes())
        .fallback(endpoint_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(list_items)
                .post(create_item)
                .fallback(endpoint_not_found),
        )
        .route(
            "/items/:id",
            get(get_item)
                .put(update_item)
                .delete(delete_item)
                .fallback(endpoint_not_found),
        )
}

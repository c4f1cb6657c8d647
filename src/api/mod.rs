//! HTTP API module: item CRUD, status endpoints and the OpenAPI document.

pub mod docs;
pub mod envelope;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use envelope::Envelope;
pub use handlers::AppState;
pub use routes::create_router;

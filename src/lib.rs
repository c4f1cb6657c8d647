//! Minimal item service backend.
//!
//! Exposes CRUD over a single resource ("item") held in a process-local,
//! non-persistent store, plus liveness, readiness and version endpoints.
//!
//! ```text
//! client ──▶ listener ──▶ router ──▶ ItemStore
//!                           │
//!                           └──▶ StatusReporter
//! ```
//!
//! Every item response uses the same envelope, `{success, data|message|error}`,
//! and the HTTP status encodes the outcome as well (200/201/400/404/500).
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Item record and in-memory store
//! - [`status`]: Health, readiness and version reporting
//! - [`api`]: HTTP routes, handlers and response envelope
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod status;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError, StoreError};

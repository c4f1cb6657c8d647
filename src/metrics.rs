//! Prometheus metrics for request tracking and store activity.
//!
//! This module provides metrics for:
//! - HTTP request counts and latency per route
//! - Item creations, updates and deletions
//! - Validation and internal failures

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Items created counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Items updated counter metric name.
pub const METRIC_ITEMS_UPDATED: &str = "items_updated_total";
/// Items deleted counter metric name.
pub const METRIC_ITEMS_DELETED: &str = "items_deleted_total";
/// Items currently stored gauge metric name.
pub const METRIC_ITEMS_STORED: &str = "items_stored";
/// Validation failures counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "item_validation_failures_total";
/// Internal errors counter metric name.
pub const METRIC_INTERNAL_ERRORS: &str = "internal_errors_total";

/// Label used for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items created");
    describe_counter!(METRIC_ITEMS_UPDATED, "Total number of items updated");
    describe_counter!(METRIC_ITEMS_DELETED, "Total number of items deleted");
    describe_gauge!(METRIC_ITEMS_STORED, "Number of items currently held in the store");
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of requests rejected by validation"
    );
    describe_counter!(
        METRIC_INTERNAL_ERRORS,
        "Total number of requests that failed with an internal error"
    );

    debug!("Metrics initialized");
}

/// Record a completed HTTP request.
pub fn record_http_request(start: Instant, method: &str, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route.to_string()).record(latency_ms);
}

/// Increment items created counter.
pub fn inc_items_created() {
    counter!(METRIC_ITEMS_CREATED).increment(1);
}

/// Increment items updated counter.
pub fn inc_items_updated() {
    counter!(METRIC_ITEMS_UPDATED).increment(1);
}

/// Increment items deleted counter.
pub fn inc_items_deleted() {
    counter!(METRIC_ITEMS_DELETED).increment(1);
}

/// Set the stored items gauge.
pub fn set_items_stored(count: usize) {
    gauge!(METRIC_ITEMS_STORED).set(count as f64);
}

/// Increment validation failures counter.
pub fn inc_validation_failures() {
    counter!(METRIC_VALIDATION_FAILURES).increment(1);
}

/// Increment internal errors counter.
pub fn inc_internal_errors() {
    counter!(METRIC_INTERNAL_ERRORS).increment(1);
}

/// Middleware recording count and latency of every request, labelled by the
/// matched route template rather than the raw path.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let response = next.run(req).await;
    record_http_request(start, &method, &route, response.status().as_u16());
    response
}

//! Liveness, readiness and build metadata reporting.
//!
//! The reporter holds no mutable state: uptime is derived from the instant it
//! was created and the build snapshot is fixed at construction.
//!
//! Readiness is unconditional. The service has no downstream dependencies to
//! check, so `/ready` answers "ready" as long as the process can serve HTTP.

use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use strum::Display;
use utoipa::ToSchema;

/// Outcome reported in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceStatus {
    /// Process is alive.
    Healthy,
    /// Process accepts traffic.
    Ready,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthReport {
    /// Always `healthy`.
    pub status: ServiceStatus,
    /// RFC 3339 time the report was produced.
    pub timestamp: String,
    /// Seconds since the process started serving.
    pub uptime: f64,
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadyReport {
    /// Always `ready`.
    pub status: ServiceStatus,
    /// RFC 3339 time the report was produced.
    pub timestamp: String,
}

/// Immutable build/version snapshot, body of `GET /version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Release version.
    pub version: String,
    /// Build timestamp.
    pub build_time: String,
    /// Source commit.
    pub commit_sha: String,
    /// Deployment environment.
    pub environment: String,
}

/// Stateless reporter for the status endpoints.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    started: Instant,
    build: BuildInfo,
}

impl StatusReporter {
    /// Create a reporter; uptime counts from now.
    pub fn new(build: BuildInfo) -> Self {
        Self {
            started: Instant::now(),
            build,
        }
    }

    /// Liveness report.
    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: ServiceStatus::Healthy,
            timestamp: now_timestamp(),
            uptime: self.uptime_seconds(),
        }
    }

    /// Readiness report.
    pub fn ready(&self) -> ReadyReport {
        ReadyReport {
            status: ServiceStatus::Ready,
            timestamp: now_timestamp(),
        }
    }

    /// Build metadata captured at startup.
    pub fn version(&self) -> &BuildInfo {
        &self.build
    }

    /// Seconds elapsed since the reporter was created.
    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

/// Format a timestamp as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

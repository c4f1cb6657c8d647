//! Application configuration loaded from environment variables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::ServiceError;
use crate::status::BuildInfo;

/// Commit reported when `COMMIT_SHA` is unset.
pub const DEFAULT_COMMIT_SHA: &str = "dev";
/// Environment reported when `ENVIRONMENT` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Application configuration loaded from environment variables.
///
/// A variable that is set but blank counts as unset and takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port", deserialize_with = "port_or_default")]
    pub port: u16,

    /// HTTP listen address.
    #[serde(default = "default_host", deserialize_with = "host_or_default")]
    pub host: String,

    // === Build Metadata ===
    /// Release version reported by `/version`.
    #[serde(default = "default_version", deserialize_with = "version_or_default")]
    pub version: String,

    /// Build timestamp; the startup time is used when unset.
    #[serde(default, deserialize_with = "non_blank")]
    pub build_time: Option<String>,

    /// Source commit the binary was built from.
    #[serde(default, deserialize_with = "non_blank")]
    pub commit_sha: Option<String>,

    /// Deployment environment name.
    #[serde(default, deserialize_with = "non_blank")]
    pub environment: Option<String>,

    // === Logging ===
    /// Log filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level", deserialize_with = "log_level_or_default")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

fn port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match non_blank(deserializer)? {
        Some(raw) => raw.trim().parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid PORT {raw:?}: {e}"))
        }),
        None => Ok(default_port()),
    }
}

fn host_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(deserializer)?.unwrap_or_else(default_host))
}

fn version_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(deserializer)?.unwrap_or_else(default_version))
}

fn log_level_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(deserializer)?.unwrap_or_else(default_log_level))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            version: default_version(),
            build_time: None,
            commit_sha: None,
            environment: None,
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration from explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.version.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "VERSION must not be empty".to_string(),
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "HOST must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective environment name.
    pub fn environment_name(&self) -> &str {
        present(self.environment.as_deref()).unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Snapshot build metadata, filling defaults. `started_at` stands in for
    /// a missing build time.
    pub fn build_info(&self, started_at: DateTime<Utc>) -> BuildInfo {
        BuildInfo {
            version: self.version.clone(),
            build_time: present(self.build_time.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| crate::status::format_timestamp(started_at)),
            commit_sha: present(self.commit_sha.as_deref())
                .unwrap_or(DEFAULT_COMMIT_SHA)
                .to_string(),
            environment: self.environment_name().to_string(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

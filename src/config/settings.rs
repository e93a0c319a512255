// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
///
/// Covers the HTTP server, the request gate credentials, the external job
/// store and the outbound fetch limits.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// HTTP server configuration
    pub server: ServerSettings,
    /// Request gate configuration
    pub auth: AuthSettings,
    /// External durable job store configuration
    pub job_store: JobStoreSettings,
    /// Outbound fetch guard limits
    pub fetch: FetchSettings,
}

/// HTTP server configuration
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Request gate configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Shared secret accepted via the `x-internal-key` header
    pub internal_key: String,
}

/// External job store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JobStoreSettings {
    /// Base URL of the durable store REST endpoint
    pub url: String,
    /// Service-level credential, distinct from caller credentials
    pub service_key: String,
    /// Per-write timeout in seconds
    pub request_timeout_secs: u64,
}

/// Outbound fetch guard limits
///
/// Defaults match the hardened production values; tests narrow them to
/// exercise the limit paths.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// Wall-clock budget for one fetch, shared across redirect hops (seconds)
    pub timeout_secs: u64,
    /// Maximum response body size in bytes, enforced while streaming
    pub max_body_bytes: usize,
}

impl Settings {
    /// Load configuration from defaults, optional files and environment
    /// variables (prefix `DEALERSCOPE`, separator `__`).
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Request gate defaults (override outside local development)
            .set_default("auth.internal_key", "dev-internal-key")?
            // Job store defaults
            .set_default("job_store.url", "http://localhost:54321/rest/v1")?
            .set_default("job_store.service_key", "dev-service-key")?
            .set_default("job_store.request_timeout_secs", 5)?
            // Fetch guard defaults
            .set_default("fetch.timeout_secs", 10)?
            .set_default("fetch.max_body_bytes", 5_000_000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DEALERSCOPE").separator("__"));

        builder.build()?.try_deserialize()
    }
}

// Server configuration loaded from environment variables.
// Decision: Bind to all interfaces on PORT (default 8080) for container deployment
// Decision: Allow any origin unless CORS_ALLOWED_ORIGINS narrows it, so the demo
// page can be opened from a different host

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use ssedemo_core::StreamConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<HeaderValue>,
    /// Optional prefix for all API routes (e.g. "/api")
    pub api_prefix: String,
    /// Pacing for the stream generators
    pub streams: StreamConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
            api_prefix: String::new(),
            streams: StreamConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (extracted for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let host = lookup("HOST")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        let api_prefix = lookup("API_PREFIX")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_default();

        let streams = StreamConfig::from_lookup(&lookup).context("Invalid stream configuration")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            api_prefix,
            streams,
        })
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Startup configuration, injected into the clients once.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardConfig {
    // Reference data (Polygon)
    #[serde(skip_serializing)]
    pub polygon_api_key: String,
    pub polygon_base_url: String,
    pub news_limit: u32,

    // Text analytics
    #[serde(skip_serializing)]
    pub text_analytics_key: String,
    pub text_analytics_endpoint: String,

    // HTTP
    pub http_timeout_secs: u64,
    pub host: String,
    pub port: u16,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing secrets are allowed and only
    /// warned about, since the affected requests fail on their own.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &str| {
            let value = lookup(key).unwrap_or_default();
            if value.trim().is_empty() {
                tracing::warn!("{} is not set; requests that need it will fail", key);
            }
            value
        };

        let config = Self {
            polygon_api_key: secret("POLYGON_API_KEY"),
            polygon_base_url: lookup("POLYGON_BASE_URL")
                .unwrap_or_else(|| polygon_client::BASE_URL.to_string()),
            news_limit: lookup("NEWS_LIMIT")
                .unwrap_or_else(|| polygon_client::DEFAULT_NEWS_LIMIT.to_string())
                .parse()
                .context("NEWS_LIMIT must be a positive integer")?,

            text_analytics_key: secret("TEXT_ANALYTICS_KEY"),
            text_analytics_endpoint: secret("TEXT_ANALYTICS_ENDPOINT"),

            http_timeout_secs: lookup("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("API_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("API_PORT must be a port number")?,
        };

        if config.news_limit == 0 {
            anyhow::bail!("NEWS_LIMIT must be greater than zero");
        }

        Ok(config)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

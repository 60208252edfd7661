use std::fmt;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
/// Read once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct Config {
    /// Gemini credential. `None` keeps the server up but every generation
    /// request fails with `ServiceMisconfigured`.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub upstream_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?;
        ensure!(timeout_secs > 0, "UPSTREAM_TIMEOUT_SECS must be greater than zero");

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

//! Environment-driven configuration, loaded once at startup.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the managed backend, without a trailing slash.
    pub backend_url: String,
    /// Publishable API key sent with every managed-backend request.
    pub backend_anon_key: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backend_url = std::env::var("BACKEND_URL").context("BACKEND_URL is not set")?;
        let backend_anon_key =
            std::env::var("BACKEND_ANON_KEY").context("BACKEND_ANON_KEY is not set")?;
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        Ok(Self { backend_url, backend_anon_key, port })
    }
}

use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:./golink.db"
    pub database_url: String,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL shown in front of short keys, e.g. "https://go.example.com".
    /// Never has a trailing slash.
    pub base_url: String,

    /// Upper bound on pooled store connections
    pub max_connections: u32,

    /// How long a single store call may run before the request fails
    pub store_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".into())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;
        if max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be greater than zero");
        }

        let timeout_ms = lookup("STORE_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".into())
            .parse::<u64>()
            .context("STORE_TIMEOUT_MS must be a number of milliseconds")?;
        if timeout_ms == 0 {
            anyhow::bail!("STORE_TIMEOUT_MS must be greater than zero");
        }

        let base_url = lookup("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:./golink.db".into()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            base_url,
            max_connections,
            store_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

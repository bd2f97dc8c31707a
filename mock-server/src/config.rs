//! Mock server settings read from the environment.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (`MOCK_HOST`, default `127.0.0.1`).
    pub host: String,
    /// Port (`PORT`, default `3000`).
    pub port: u16,
    /// Start with the sample todos (`MOCK_SEED`, default off).
    pub seed: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {e}"))?,
            Err(_) => 3000,
        };
        Ok(Self {
            host: env::var("MOCK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            seed: env::var("MOCK_SEED").is_ok_and(|v| is_truthy(&v)),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

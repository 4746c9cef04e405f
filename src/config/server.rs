use crate::config::env_or;
use crate::core::Result;
use serde::Deserialize;

/// Server configuration for HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { host, port, workers }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            env_or("SERVER_HOST", "0.0.0.0")?,
            env_or("SERVER_PORT", "8080")?,
        ))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

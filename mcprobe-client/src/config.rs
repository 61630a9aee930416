//! Endpoint configuration
//!
//! The probe targets a fixed path on a local server by default,
//! `http://localhost:8080/mcp`. Host and port can be overridden in code or
//! through `MCPROBE_HOST` / `MCPROBE_PORT`.

use mcprobe_core::{Error, Result};
use reqwest::Url;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const MCP_PATH: &str = "/mcp";

pub const HOST_ENV: &str = "MCPROBE_HOST";
pub const PORT_ENV: &str = "MCPROBE_PORT";

/// Where requests are POSTed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: MCP_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `MCPROBE_HOST` and `MCPROBE_PORT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a valid port: '{}'", PORT_ENV, port)))?;
        }
        Ok(config)
    }

    /// `http://<host>:<port><path>`
    pub fn endpoint(&self) -> Result<Url> {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        let text = format!("http://{}:{}{}", self.host, self.port, path);
        Url::parse(&text).map_err(|e| Error::Config(format!("invalid endpoint '{}': {}", text, e)))
    }
}

//! Client builder for endpoint, credentials and observability
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcprobe_client::{Auth, ClientBuilder};
//!
//! # fn example() -> mcprobe_core::Result<()> {
//! // Default endpoint http://localhost:8080/mcp, no auth
//! let client = ClientBuilder::new().build()?;
//!
//! // Another port, API key on every `call()` that does not pick its own auth
//! let client = ClientBuilder::new()
//!     .port(9000)
//!     .default_auth(Auth::api_key("mcp-weather-api-key-12345"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::{Auth, ClientMetrics, HttpRpcClient};
use mcprobe_core::{Error, ObservabilityConfig, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and creating an [`HttpRpcClient`]
pub struct ClientBuilder {
    config: ClientConfig,
    default_auth: Option<Auth>,
    timeout: Option<Duration>,
    user_agent: String,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
    enable_metrics: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            default_auth: None,
            timeout: None,
            user_agent: concat!("mcprobe/", env!("CARGO_PKG_VERSION")).to_string(),
            observability_config: None,
            service_name: None,
            enable_metrics: false,
        }
    }

    /// Replace the whole endpoint configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Credentials for calls built with [`HttpRpcClient::call`] that neither
    /// set nor clear auth. [`HttpRpcClient::send`] never applies them.
    pub fn default_auth(mut self, auth: Auth) -> Self {
        self.default_auth = Some(auth);
        self
    }

    /// Whole-call timeout. Off by default: a hung server keeps the caller
    /// waiting.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Initialize observability with this configuration on `build()`, and
    /// record client metrics
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self.enable_metrics = true;
        self
    }

    pub fn with_default_observability(self) -> Self {
        self.with_observability(ObservabilityConfig::default())
    }

    /// Service name for observability and the metrics scope
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Record client metrics against whatever meter provider is installed
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    pub fn build(self) -> Result<HttpRpcClient> {
        let endpoint = self.config.endpoint()?;

        let mut service_name = self
            .service_name
            .clone()
            .unwrap_or_else(|| "mcprobe".to_string());

        if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }
            service_name = config.service_name.clone();
            mcprobe_core::init_observability(config)?;
        }

        let metrics = self
            .enable_metrics
            .then(|| Arc::new(ClientMetrics::new(service_name)));

        // No idle connections are kept, so every call opens its own, straight
        // to the endpoint: proxy environment variables are ignored.
        let mut http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| Error::Config(format!("http client: {}", e)))?;

        tracing::debug!(endpoint = %endpoint, "Client configured");

        Ok(HttpRpcClient {
            http,
            endpoint,
            default_auth: self.default_auth,
            metrics,
        })
    }
}

//! Typed helpers for the MCP methods exercised by the probe
//!
//! These are thin wrappers over [`HttpRpcClient::send`]. They return the raw
//! [`RpcOutcome`] so callers can still see 401s and JSON-RPC errors; use
//! [`RpcOutcome::result_as`] with the result types below to decode a success.
//!
//! ```rust,no_run
//! use mcprobe_client::mcp::{CallToolParams, InitializeParams, InitializeResult};
//! use mcprobe_client::HttpRpcClient;
//!
//! # async fn example() -> mcprobe_core::Result<()> {
//! let client = HttpRpcClient::new()?;
//! let init = client
//!     .initialize(&InitializeParams::new("weather-test-client", "1.0.0"), None)
//!     .await?;
//! let info: InitializeResult = init.result_as()?;
//! println!("connected to {}", info.server_info.name);
//!
//! let call = CallToolParams::weather("Vancouver", "CA");
//! let weather = client.call_tool(&call, None).await?;
//! println!("{}", weather);
//! # Ok(())
//! # }
//! ```

use crate::call::DEFAULT_ID;
use crate::outcome::RpcOutcome;
use crate::{Auth, HttpRpcClient};
use mcprobe_core::{JsonRpcRequest, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";
pub const METHOD_PING: &str = "ping";

/// Protocol revision announced in `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Weather tool exposed by the reference server
pub const WEATHER_TOOL: &str = "getWeatherInfo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    pub capabilities: Value,
    pub client_info: ClientInfo,
}

impl InitializeParams {
    /// Announce [`PROTOCOL_VERSION`] with tool capabilities
    pub fn new(client_name: impl Into<String>, client_version: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: json!({ "tools": {} }),
            client_info: ClientInfo {
                name: client_name.into(),
                version: client_version.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: Value,
    pub server_info: ServerInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Auth schemes advertised under `capabilities.experimental.authentication`
    pub fn auth_methods(&self) -> Vec<String> {
        self.capabilities
            .pointer("/experimental/authentication/methods")
            .and_then(Value::as_array)
            .map(|methods| {
                methods
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Value,
}

impl CallToolParams {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// `getWeatherInfo` for a city and ISO country code
    pub fn weather(city: &str, country_code: &str) -> Self {
        Self::new(WEATHER_TOOL, json!({ "name": city, "countrycode": country_code }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    /// Text blocks joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl HttpRpcClient {
    pub async fn initialize(
        &self,
        params: &InitializeParams,
        auth: Option<&Auth>,
    ) -> Result<RpcOutcome> {
        self.send(METHOD_INITIALIZE, params, DEFAULT_ID, auth).await
    }

    pub async fn list_tools(&self, auth: Option<&Auth>) -> Result<RpcOutcome> {
        self.send(METHOD_TOOLS_LIST, JsonRpcRequest::empty_params(), DEFAULT_ID, auth)
            .await
    }

    pub async fn call_tool(&self, params: &CallToolParams, auth: Option<&Auth>) -> Result<RpcOutcome> {
        self.send(METHOD_TOOLS_CALL, params, DEFAULT_ID, auth).await
    }

    pub async fn ping(&self, auth: Option<&Auth>) -> Result<RpcOutcome> {
        self.send(METHOD_PING, JsonRpcRequest::empty_params(), DEFAULT_ID, auth)
            .await
    }
}

//! Error types for mcprobe
//!
//! Two kinds of errors live here:
//!
//! - **Error**: local failures of a call (uses thiserror)
//! - **JsonRpcErrorData**: the wire-format error object defined by JSON-RPC 2.0
//!
//! # What is *not* an `Error`
//!
//! A server that answers with an `error` member, with HTTP 401, or with a body
//! that is not JSON has still answered. Those outcomes are returned to the
//! caller as values so they can be inspected. `Error` is reserved for calls
//! that never produced a response (transport failures) or were never sent
//! (bad input, bad configuration).
//!
//! # Standard Error Codes
//!
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for mcprobe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Local failure of an mcprobe operation
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Connection refused, reset, name resolution failure, or the body stream
    /// broke before the end. Carries the transport's own error.
    #[error("Transport error: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    /// Params (or a typed result) could not be converted to/from JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request was rejected before sending, e.g. an empty method name
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A credential cannot be carried in an HTTP header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Endpoint or environment configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON-RPC error object returned by the server
    ///
    /// Only produced by helpers that opt into typed results; `send` itself
    /// returns protocol errors as values.
    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] JsonRpcErrorData),

    /// The server answered without a JSON-RPC result or error object, e.g. a
    /// 401 with `{"error": "Unauthorized"}` or a non-JSON body
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the server could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_connect())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Arc::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// JSON-RPC 2.0 error object
///
/// `code` and `message` are mandatory, `data` is optional.
///
/// # Examples
///
/// ```rust
/// use mcprobe_core::JsonRpcErrorData;
///
/// let error = JsonRpcErrorData::method_not_found("invalid/method");
/// assert_eq!(error.code, -32601);
/// assert_eq!(error.to_string(), "[-32601] Method not found: invalid/method");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code; -32768..=-32000 is reserved by the protocol
    pub code: i32,
    /// Short description of the error
    pub message: String,
    /// Additional server-defined detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(-32600, msg)
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(-32602, msg)
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(-32603, msg)
    }

    /// True for the codes reserved by JSON-RPC 2.0 itself
    pub fn is_reserved(&self) -> bool {
        (-32768..=-32000).contains(&self.code)
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

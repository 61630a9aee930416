//! JSON-RPC 2.0 wire types used by the HTTP probe client
//!
//! Only the two message shapes that cross the wire in a single-shot HTTP
//! exchange are modeled here:
//!
//! 1. **Request**: the envelope POSTed to the server
//! 2. **Response**: the envelope the server answers with (success or error)
//!
//! # Request IDs
//!
//! The client always sends integer IDs, but servers are free to echo back
//! a string or `null` (for example when they could not read the request), so
//! [`Id`] accepts all three shapes when decoding.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version string carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// Serialized untagged, so `Id::Number(1)` is written as `1` and
/// `Id::String("a".into())` as `"a"`.
///
/// # Examples
///
/// ```rust
/// use mcprobe_core::Id;
///
/// let id: Id = 42i64.into();
/// assert_eq!(id.to_string(), "42");
/// assert_eq!(Id::default(), Id::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric identifier, the only kind the client emits
    Number(i64),
    /// String identifier, accepted from servers that echo one back
    String(String),
    /// Null identifier, used by servers that could not determine the request id
    #[default]
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

/// JSON-RPC 2.0 request message
///
/// Unlike a general-purpose JSON-RPC request, `params` is always present on
/// the wire. Servers under test expect an object even for parameterless
/// methods such as `ping`, so the empty mapping `{}` stands in for "no
/// parameters".
///
/// Field order matches what the server sees:
/// `{"jsonrpc":"2.0","id":1,"method":"ping","params":{}}`.
///
/// # Examples
///
/// ```rust
/// use mcprobe_core::JsonRpcRequest;
/// use serde_json::json;
///
/// let req = JsonRpcRequest::new("tools/list", json!({}), 7);
/// assert_eq!(req.jsonrpc, "2.0");
/// assert_eq!(req.method, "tools/list");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Caller-supplied correlation identifier
    pub id: Id,
    /// Name of the remote operation
    pub method: String,
    /// Structured payload, `{}` when the caller has nothing to send
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    /// Create a request envelope with an integer id.
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: i64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Id::Number(id),
            method: method.into(),
            params,
        }
    }

    /// Empty parameter mapping
    pub fn empty_params() -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }
}

/// JSON-RPC 2.0 response message
///
/// Exactly one of `result` or `error` is expected on a well-formed response.
/// This type is only produced by decoding server output, so it tolerates a
/// missing `id` (decoded as [`Id::Null`]) and leaves it to the caller to
/// decide how strict to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version echoed by the server
    pub jsonrpc: String,
    /// Successful result, absent on error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error object, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    /// Id echoed from the request
    #[serde(default)]
    pub id: Id,
}

impl JsonRpcResponse {
    /// Create a successful response (used by tests and mock servers)
    pub fn success(result: serde_json::Value, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response (used by tests and mock servers)
    pub fn error(error: JsonRpcErrorData, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when the envelope declares version 2.0 and carries exactly one
    /// of `result` or `error`.
    pub fn is_well_formed(&self) -> bool {
        self.jsonrpc == JSONRPC_VERSION && (self.result.is_some() != self.error.is_some())
    }
}

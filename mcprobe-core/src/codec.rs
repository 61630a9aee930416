//! Codec for the HTTP request/response bodies
//!
//! Encoding is ordinary serde work. Decoding is where the probe client differs
//! from a strict JSON-RPC peer: a response body is never an error. Whatever
//! the server sends back is classified into one of two shapes:
//!
//! - **Object**: the body is a JSON object and is passed through untouched,
//!   whether it is a JSON-RPC success, a JSON-RPC error, or some ad-hoc
//!   payload such as `{"error": "Unauthorized"}`
//! - **Malformed**: anything else (invalid JSON, an empty body, a bare
//!   array or scalar), kept as the exact bytes received
//!
//! # Examples
//!
//! ```rust
//! use mcprobe_core::codec::{self, DecodedBody};
//!
//! let body = codec::decode_body(br#"{"jsonrpc":"2.0","id":1,"result":{}}"#);
//! assert!(matches!(body, DecodedBody::Object(_)));
//!
//! let body = codec::decode_body(b"<html>502 Bad Gateway</html>");
//! assert!(matches!(body, DecodedBody::Malformed(_)));
//! ```

use crate::error::Result;
use crate::types::JsonRpcRequest;
use crate::JsonRpcResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel placed in the `error` member when a body cannot be parsed
pub const INVALID_JSON_RESPONSE: &str = "Invalid JSON response";

/// Classified response body
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// The body parsed as a JSON object
    Object(Map<String, Value>),
    /// The body is not a JSON object; the exact bytes received
    Malformed(Vec<u8>),
}

/// Encode any serializable value to JSON text
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    Ok(serde_json::to_string(msg)?)
}

/// Encode a request envelope to JSON text
///
/// ```rust
/// use mcprobe_core::{codec, JsonRpcRequest};
///
/// let request = JsonRpcRequest::new("ping", JsonRpcRequest::empty_params(), 1);
/// let json = codec::encode_request(&request).unwrap();
/// assert_eq!(json, r#"{"jsonrpc":"2.0","id":1,"method":"ping","params":{}}"#);
/// ```
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Convert caller params into the wire `params` value
///
/// `null` (e.g. from `()` or `None`) becomes the empty mapping, since the
/// server always expects an object-shaped `params` member.
pub fn params_to_value<P: Serialize>(params: P) -> Result<Value> {
    match serde_json::to_value(params)? {
        Value::Null => Ok(JsonRpcRequest::empty_params()),
        other => Ok(other),
    }
}

/// Classify a buffered response body. Never fails.
pub fn decode_body(raw: &[u8]) -> DecodedBody {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => DecodedBody::Object(map),
        _ => DecodedBody::Malformed(raw.to_vec()),
    }
}

/// Decode a parsed body into a typed JSON-RPC response
///
/// Returns `None` when the object is not shaped like a JSON-RPC response,
/// for instance `{"error": "Unauthorized"}` where `error` is a plain string.
pub fn decode_response(body: &Map<String, Value>) -> Option<JsonRpcResponse> {
    JsonRpcResponse::deserialize(Value::Object(body.clone())).ok()
}

/// Decode JSON text to a specific type
pub fn decode_as<'de, T: Deserialize<'de>>(data: &'de str) -> Result<T> {
    Ok(serde_json::from_str(data)?)
}

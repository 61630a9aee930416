//! Core JSON-RPC 2.0 types and codec for mcprobe
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Types**: the request and response envelopes
//! - **Codec**: request encoding and response-body classification
//! - **Error handling**: local failures vs. wire-format error objects
//! - **Observability**: tracing subscriber and OpenTelemetry setup
//!
//! The `mcprobe-client` crate adds the HTTP transport on top.
//!
//! # Example
//!
//! ```rust
//! use mcprobe_core::{codec, JsonRpcRequest};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("tools/list", json!({}), 1);
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains("\"method\":\"tools/list\""));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;

pub use codec::{DecodedBody, INVALID_JSON_RESPONSE};
pub use error::{Error, JsonRpcErrorData, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{Id, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};

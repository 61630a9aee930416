//! JSON-RPC 2.0 client over HTTP POST
//!
//! One call, one connection, one fully buffered response:
//!
//! - **Request**: `{"jsonrpc":"2.0","id":..,"method":..,"params":{..}}` POSTed
//!   to `http://<host>:<port>/mcp`
//! - **Authentication**: optional bearer token, basic credentials or API key,
//!   each mapped to exactly one header
//! - **Outcome**: HTTP status code plus the parsed JSON object, or the raw
//!   bytes when the body is not JSON
//! - **Observability**: a `tracing` span per call and optional OpenTelemetry
//!   metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcprobe_client::{Auth, HttpRpcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpRpcClient::new()?;
//!
//!     let outcome = client
//!         .call("tools/list")
//!         .auth(Auth::bearer("bearer-token-abcdef123456"))
//!         .send()
//!         .await?;
//!
//!     if outcome.is_unauthorized() {
//!         println!("rejected");
//!     } else {
//!         println!("{}", outcome);
//!     }
//!     Ok(())
//! }
//! ```

mod auth;
mod call;
mod client;
mod client_builder;
pub mod config;
mod metrics;
pub mod mcp;
mod outcome;

pub use auth::{Auth, API_KEY_HEADER};
pub use call::{RpcCall, DEFAULT_ID};
pub use client::HttpRpcClient;
pub use client_builder::ClientBuilder;
pub use config::ClientConfig;
pub use metrics::ClientMetrics;
pub use outcome::{RpcOutcome, STATUS_UNAUTHORIZED};

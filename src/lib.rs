//! mcprobe - JSON-RPC 2.0 over HTTP for probing MCP servers
//!
//! This is the convenience crate that re-exports the mcprobe sub-crates and
//! hosts the `mcprobe` command line tool.
//!
//! # Architecture
//!
//! - **mcprobe-core**: Core types, codec, error handling, observability
//! - **mcprobe-client**: HTTP client, authentication, call outcomes, MCP helpers
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcprobe::{Auth, HttpRpcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpRpcClient::builder().host("localhost").port(8080).build()?;
//!
//!     let outcome = client
//!         .call("initialize")
//!         .auth(Auth::api_key("mcp-weather-api-key-12345"))
//!         .send()
//!         .await?;
//!     println!("{}", outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod probe;

pub use mcprobe_client as client;
pub use mcprobe_core as core;

pub use mcprobe_client::{Auth, ClientBuilder, ClientConfig, HttpRpcClient, RpcOutcome};
pub use mcprobe_core::{Error, Result};

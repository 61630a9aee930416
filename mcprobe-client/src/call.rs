//! Per-call builder
//!
//! ```rust,no_run
//! use mcprobe_client::{Auth, HttpRpcClient};
//! use serde_json::json;
//!
//! # async fn example() -> mcprobe_core::Result<()> {
//! let client = HttpRpcClient::new()?;
//!
//! // params = {}, id = 1, the client's default auth if it has one
//! let pong = client.call("ping").send().await?;
//!
//! // no credentials whatever the client default
//! let anonymous = client.call("initialize").no_auth().send().await?;
//!
//! let weather = client
//!     .call("tools/call")
//!     .params(json!({"name": "getWeatherInfo", "arguments": {"name": "Paris", "countrycode": "FR"}}))
//!     .id(2)
//!     .auth(Auth::api_key("mcp-weather-api-key-12345"))
//!     .send()
//!     .await?;
//! println!("{} {} -> {}", pong.status_code(), anonymous.status_code(), weather);
//! # Ok(())
//! # }
//! ```

use crate::outcome::RpcOutcome;
use crate::{Auth, HttpRpcClient};
use mcprobe_core::{codec, JsonRpcRequest, Result};
use serde::Serialize;
use serde_json::Value;

/// Id used when the caller does not pick one
pub const DEFAULT_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq)]
enum CallAuth {
    /// Whatever the client was built with
    ClientDefault,
    Explicit(Option<Auth>),
}

/// One pending call; nothing is sent until [`RpcCall::send`]
#[must_use = "a call does nothing until `send` is awaited"]
pub struct RpcCall<'a> {
    client: &'a HttpRpcClient,
    method: String,
    // Deferred so a bad payload surfaces from `send`, keeping the chain flat.
    params: Result<Value>,
    id: i64,
    auth: CallAuth,
}

impl<'a> RpcCall<'a> {
    pub(crate) fn new(client: &'a HttpRpcClient, method: String) -> Self {
        Self {
            client,
            method,
            params: Ok(JsonRpcRequest::empty_params()),
            id: DEFAULT_ID,
            auth: CallAuth::ClientDefault,
        }
    }

    pub fn params<P: Serialize>(mut self, params: P) -> Self {
        self.params = codec::params_to_value(params);
        self
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = CallAuth::Explicit(Some(auth));
        self
    }

    /// Like [`auth`](Self::auth) but accepts an optional descriptor;
    /// `None` sends no credentials
    pub fn maybe_auth(mut self, auth: Option<Auth>) -> Self {
        self.auth = CallAuth::Explicit(auth);
        self
    }

    /// Send without credentials, overriding the client's default
    pub fn no_auth(self) -> Self {
        self.maybe_auth(None)
    }

    pub async fn send(self) -> Result<RpcOutcome> {
        let params = self.params?;
        let auth = match &self.auth {
            CallAuth::ClientDefault => self.client.default_auth(),
            CallAuth::Explicit(auth) => auth.as_ref(),
        };
        self.client.send(&self.method, params, self.id, auth).await
    }
}

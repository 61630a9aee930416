//! JSON-RPC client over HTTP POST
//!
//! Each call is a single linear exchange:
//!
//! 1. **Encode**: build `{"jsonrpc":"2.0","id":..,"method":..,"params":..}`
//! 2. **Send**: POST it on a fresh connection with `Content-Type:
//!    application/json`, `Content-Length` and at most one auth header
//! 3. **Buffer**: read the whole response body
//! 4. **Classify**: JSON object or malformed body, paired with the status code
//!
//! Only a failure in steps 2–3 is an `Err`. Nothing is retried.
//!
//! # Cloning
//!
//! `HttpRpcClient` is cheap to clone and can be used from several tasks at
//! once. Calls are independent; the client does not match responses to ids.

use crate::call::RpcCall;
use crate::outcome::RpcOutcome;
use crate::{Auth, ClientBuilder, ClientMetrics};
use mcprobe_core::{codec, Error, JsonRpcRequest, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC client over HTTP
#[derive(Clone)]
pub struct HttpRpcClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoint: Url,
    pub(crate) default_auth: Option<Auth>,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl std::fmt::Debug for HttpRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRpcClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("default_auth", &self.default_auth)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl HttpRpcClient {
    /// Client for the default endpoint `http://localhost:8080/mcp`
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn default_auth(&self) -> Option<&Auth> {
        self.default_auth.as_ref()
    }

    /// Start a call with defaults `params = {}`, `id = 1` and the default auth
    pub fn call(&self, method: impl Into<String>) -> RpcCall<'_> {
        RpcCall::new(self, method.into())
    }

    /// Send one request and wait for the complete response
    ///
    /// `auth` is taken as given: `None` sends no credential header, even when
    /// the client has default credentials.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidRequest` for an empty method name
    /// - `Error::Serialization` when `params` cannot be encoded
    /// - `Error::InvalidHeader` when a credential is not a legal header value
    /// - `Error::Transport` when no response was received
    ///
    /// Non-JSON bodies, JSON-RPC errors and HTTP error statuses are returned
    /// as `Ok(RpcOutcome)`.
    #[tracing::instrument(
        name = "rpc.send",
        skip_all,
        fields(method = %method, id = id, auth = tracing::field::Empty, status = tracing::field::Empty)
    )]
    pub async fn send<P>(
        &self,
        method: &str,
        params: P,
        id: i64,
        auth: Option<&Auth>,
    ) -> Result<RpcOutcome>
    where
        P: Serialize,
    {
        if method.is_empty() {
            return Err(Error::InvalidRequest("method name must not be empty".into()));
        }

        let request = JsonRpcRequest::new(method, codec::params_to_value(params)?, id);
        let body = codec::encode_request(&request)?;

        let scheme = auth.map(Auth::scheme).unwrap_or("none");
        tracing::Span::current().record("auth", scheme);

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            let (name, value) = auth.header()?;
            builder = builder.header(name, value);
        }

        let start = Instant::now();
        tracing::debug!(bytes = body.len(), "Request dispatched");

        let response = match builder.body(body).send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(method, e)),
        };
        let status_code = response.status().as_u16();
        tracing::Span::current().record("status", status_code);

        let raw = match response.bytes().await {
            Ok(raw) => raw,
            Err(e) => return Err(self.transport_failure(method, e)),
        };
        let outcome = RpcOutcome::from_raw(status_code, &raw);
        let duration = start.elapsed().as_secs_f64();

        if outcome.is_malformed() {
            tracing::warn!(bytes = raw.len(), "Response body is not a JSON object");
        }
        if outcome.is_unauthorized() {
            tracing::warn!("Server rejected credentials");
        }

        if let Some(ref m) = self.metrics {
            m.record_request(method, status_code, duration);
            if outcome.is_malformed() {
                m.record_malformed(method);
            }
            if outcome.is_unauthorized() {
                m.record_auth_rejection(scheme);
            }
        }

        tracing::debug!(duration_secs = duration, "Response received");
        Ok(outcome)
    }

    fn transport_failure(&self, method: &str, err: reqwest::Error) -> Error {
        tracing::error!(error = %err, endpoint = %self.endpoint, "Transport failure");
        if let Some(ref m) = self.metrics {
            m.record_transport_error(method);
        }
        Error::from(err)
    }
}

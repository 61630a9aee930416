//! Common test utilities for mcprobe-client integration tests
//!
//! - [`MockHttpServer`]: an axum app on a random local port that records every
//!   request and answers with whatever the test's handler returns
//! - [`FaultyServer`]: a bare listener for broken exchanges (connection
//!   dropped, body cut short, no answer at all)

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use mcprobe_client::{ClientBuilder, HttpRpcClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn header_count(&self, name: &str) -> usize {
        self.headers.get_all(name).iter().count()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    /// `method` member of the JSON-RPC envelope
    pub fn rpc_method(&self) -> String {
        self.json()["method"].as_str().unwrap_or_default().to_string()
    }
}

/// A complete, well-framed reply
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl MockReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn raw(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_vec(),
        }
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

type Handler = Arc<dyn Fn(&CapturedRequest) -> MockReply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    handler: Handler,
    request_tx: mpsc::Sender<CapturedRequest>,
}

async fn capture(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = CapturedRequest {
        method,
        uri,
        headers,
        body,
    };
    let reply = (state.handler)(&request);
    let _ = state.request_tx.send(request).await;
    reply.into_response()
}

/// Mock HTTP server for client testing
pub struct MockHttpServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    request_rx: mpsc::Receiver<CapturedRequest>,
}

impl MockHttpServer {
    /// Server answering every request with `reply`
    pub async fn replying(reply: MockReply) -> Self {
        Self::with_handler(move |_| reply.clone()).await
    }

    /// Server answering through `handler`, whatever the path
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&CapturedRequest) -> MockReply + Send + Sync + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (request_tx, request_rx) = mpsc::channel::<CapturedRequest>(100);

        let app = Router::<MockState>::new().fallback(capture).with_state(MockState {
            handler: Arc::new(handler),
            request_tx,
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await;
        });

        Self {
            addr,
            shutdown_tx,
            request_rx,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Next request received, or None after 5 seconds
    pub async fn next_request(&mut self) -> Option<CapturedRequest> {
        tokio::time::timeout(tokio::time::Duration::from_secs(5), self.request_rx.recv())
            .await
            .ok()
            .flatten()
    }

    /// Requests received so far without waiting
    pub fn drain_requests(&mut self) -> Vec<CapturedRequest> {
        let mut requests = Vec::new();
        while let Ok(request) = self.request_rx.try_recv() {
            requests.push(request);
        }
        requests
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Broken exchanges
#[derive(Debug, Clone)]
pub enum Fault {
    /// Drop the connection without answering
    Close,
    /// Keep the connection open and never answer
    Hang,
    /// Announce `declared_len` body bytes, send `body`, then close
    Truncated { body: Vec<u8>, declared_len: usize },
}

/// Listener that accepts connections and misbehaves on each one
pub struct FaultyServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    arrived_rx: mpsc::Receiver<Vec<u8>>,
}

impl FaultyServer {
    pub async fn start(fault: Fault) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (arrived_tx, arrived_rx) = mpsc::channel::<Vec<u8>>(100);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { continue };
                        tokio::spawn(misbehave(stream, fault.clone(), arrived_tx.clone()));
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            arrived_rx,
        }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// First bytes of the next request that reached the server, or None after
    /// 5 seconds
    pub async fn next_arrival(&mut self) -> Option<Vec<u8>> {
        tokio::time::timeout(tokio::time::Duration::from_secs(5), self.arrived_rx.recv())
            .await
            .ok()
            .flatten()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn misbehave(mut stream: TcpStream, fault: Fault, arrived_tx: mpsc::Sender<Vec<u8>>) {
    let mut buf = vec![0u8; 8192];
    let n = stream.read(&mut buf).await.unwrap_or(0);
    buf.truncate(n);
    let _ = arrived_tx.send(buf).await;

    match fault {
        Fault::Close => drop(stream),
        Fault::Hang => {
            tokio::time::sleep(tokio::time::Duration::from_secs(3600)).await;
        }
        Fault::Truncated { body, declared_len } => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
                declared_len
            );
            let _ = stream.write_all(head.as_bytes()).await;
            let _ = stream.write_all(&body).await;
            let _ = stream.shutdown().await;
        }
    }
}

/// Client pointed at the mock's `/mcp` endpoint
pub fn client_for(server: &MockHttpServer) -> HttpRpcClient {
    builder_for(server.port()).build().unwrap()
}

pub fn builder_for(port: u16) -> ClientBuilder {
    ClientBuilder::new().host("127.0.0.1").port(port)
}

/// A port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Helper to create a JSON-RPC success body
pub fn mock_response(id: i64, result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

/// Helper to create a JSON-RPC error body
pub fn mock_error_response(id: i64, code: i32, message: &str, data: &str) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message,
            "data": data
        }
    })
}

pub const VALID_API_KEY: &str = "mcp-weather-api-key-12345";
pub const VALID_BEARER: &str = "bearer-token-abcdef123456";
pub const VALID_BASIC: &str = "bWNwOndlYXRoZXI=";

/// Handler modeled on the reference weather server
///
/// Credentials are checked first: a wrong API key, bearer token or basic
/// credential gets 401; no credentials at all are let through.
pub fn weather_server(request: &CapturedRequest) -> MockReply {
    if !credentials_accepted(&request.headers) {
        return MockReply::json(
            401,
            mock_error_response(-1, -32001, "Unauthorized", "Authentication required"),
        );
    }

    let Ok(envelope) = serde_json::from_slice::<serde_json::Value>(&request.body) else {
        return MockReply::json(
            400,
            mock_error_response(-1, -32603, "Internal error", "unreadable body"),
        );
    };
    let id = envelope["id"].as_i64().unwrap_or(0);
    let method = envelope["method"].as_str().unwrap_or_default();

    let body = match method {
        "initialize" => mock_response(
            id,
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "experimental": {
                        "authentication": { "supported": true, "methods": ["api-key", "bearer", "basic"] }
                    }
                },
                "serverInfo": { "name": "Weather MCP Server with Auth", "version": "1.0.0" }
            }),
        ),
        "tools/list" => mock_response(
            id,
            serde_json::json!({
                "tools": [{
                    "name": "getWeatherInfo",
                    "description": "Get temperature forecast for a city for the next days in celsius",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "description": "City name" },
                            "countrycode": { "type": "string", "description": "Country code (e.g., CA, US, GB)" }
                        },
                        "required": ["name", "countrycode"]
                    }
                }]
            }),
        ),
        "tools/call" => {
            let params = &envelope["params"];
            if params["name"] != "getWeatherInfo" {
                mock_error_response(id, -32602, "Invalid tool name", params["name"].as_str().unwrap_or_default())
            } else {
                let city = params["arguments"]["name"].as_str().unwrap_or_default();
                let country = params["arguments"]["countrycode"].as_str().unwrap_or_default();
                mock_response(
                    id,
                    serde_json::json!({
                        "content": [{ "type": "text", "text": format!("Forecast for {}, {}: 18C", city, country) }]
                    }),
                )
            }
        }
        "ping" => mock_response(id, serde_json::json!({})),
        other => mock_error_response(id, -32601, "Method not found", other),
    };

    MockReply::json(200, body)
}

fn credentials_accepted(headers: &HeaderMap) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    if let Some(key) = header("x-api-key") {
        return key == VALID_API_KEY;
    }
    if let Some(authorization) = header("authorization") {
        if let Some(token) = authorization.strip_prefix("Bearer ") {
            return token == VALID_BEARER;
        }
        if let Some(encoded) = authorization.strip_prefix("Basic ") {
            return encoded == VALID_BASIC;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_response_format() {
        let response = mock_response(1, serde_json::json!({"value": 42}));
        assert_eq!(response["jsonrpc"], "2.0");
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["value"], 42);
    }

    #[test]
    fn test_mock_error_response_format() {
        let response = mock_error_response(1, -32601, "Method not found", "x");
        assert_eq!(response["error"]["code"], -32601);
        assert!(response.get("result").is_none());
    }
}

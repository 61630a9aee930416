//! Outcome of one RPC call
//!
//! Every call that reaches the server yields an [`RpcOutcome`]: the HTTP
//! status code plus the classified body. Nothing here is an error in the
//! Rust sense. A 401, a JSON-RPC `error` member, and a body that is not JSON
//! are all answers the caller may want to inspect.
//!
//! [`RpcOutcome::to_value`] renders the flat shape probe output uses:
//!
//! ```text
//! { ...parsedBody, "statusCode": 200 }
//! { "error": "Invalid JSON response", "raw": "<body>", "statusCode": 502 }
//! ```

use mcprobe_core::codec::{self, DecodedBody, INVALID_JSON_RESPONSE};
use mcprobe_core::{Error, JsonRpcErrorData, JsonRpcResponse, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// HTTP status servers use to reject credentials
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Status code and body of a completed call
#[derive(Debug, Clone, PartialEq)]
pub struct RpcOutcome {
    status_code: u16,
    body: DecodedBody,
}

impl RpcOutcome {
    pub fn new(status_code: u16, body: DecodedBody) -> Self {
        Self { status_code, body }
    }

    /// Classify raw bytes received with `status_code`
    pub fn from_raw(status_code: u16, raw: &[u8]) -> Self {
        Self::new(status_code, codec::decode_body(raw))
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &DecodedBody {
        &self.body
    }

    /// The parsed JSON object, if the body was one
    pub fn object(&self) -> Option<&Map<String, Value>> {
        match &self.body {
            DecodedBody::Object(map) => Some(map),
            DecodedBody::Malformed(_) => None,
        }
    }

    /// Exact bytes received when the body could not be parsed
    pub fn raw_body(&self) -> Option<&[u8]> {
        match &self.body {
            DecodedBody::Malformed(raw) => Some(raw),
            DecodedBody::Object(_) => None,
        }
    }

    /// The raw body as text, lossily decoded
    pub fn raw_text(&self) -> Option<Cow<'_, str>> {
        self.raw_body().map(String::from_utf8_lossy)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.body, DecodedBody::Malformed(_))
    }

    /// The `result` member
    pub fn result(&self) -> Option<&Value> {
        self.object().and_then(|map| map.get("result"))
    }

    /// The `error` member of a parsed body, whatever its shape
    pub fn error(&self) -> Option<&Value> {
        self.object().and_then(|map| map.get("error"))
    }

    /// The `error` member decoded as a JSON-RPC error object
    pub fn error_data(&self) -> Option<JsonRpcErrorData> {
        self.error()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn is_success(&self) -> bool {
        self.result().is_some()
    }

    /// True when the flat rendering carries an `error` member, which includes
    /// malformed bodies
    pub fn is_error(&self) -> bool {
        self.is_malformed() || self.error().is_some()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == STATUS_UNAUTHORIZED
    }

    /// Typed JSON-RPC response, when the body is shaped like one
    pub fn into_response(self) -> Option<JsonRpcResponse> {
        match self.body {
            DecodedBody::Object(map) => codec::decode_response(&map),
            DecodedBody::Malformed(_) => None,
        }
    }

    /// Decode `result` into `T`, turning every other answer into an `Err`
    ///
    /// - JSON-RPC error object → `Error::JsonRpc`
    /// - any other `error` member, a malformed body, or a body with neither
    ///   member → `Error::Http`
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T> {
        if let Some(result) = self.result() {
            return Ok(serde_json::from_value(result.clone())?);
        }
        if let Some(data) = self.error_data() {
            return Err(Error::JsonRpc(data));
        }

        let message = match (self.error(), self.raw_text()) {
            (Some(Value::String(s)), _) => s.clone(),
            (Some(other), _) => other.to_string(),
            (None, Some(_)) => INVALID_JSON_RESPONSE.to_string(),
            (None, None) => "response has neither result nor error".to_string(),
        };
        Err(Error::Http {
            status: self.status_code,
            message,
        })
    }

    /// Flat rendering with the status code merged in
    pub fn to_value(&self) -> Value {
        let mut map = match &self.body {
            DecodedBody::Object(map) => map.clone(),
            DecodedBody::Malformed(raw) => {
                let mut map = Map::new();
                map.insert("error".into(), Value::String(INVALID_JSON_RESPONSE.into()));
                map.insert(
                    "raw".into(),
                    Value::String(String::from_utf8_lossy(raw).into_owned()),
                );
                map
            }
        };
        map.insert("statusCode".into(), Value::from(self.status_code));
        Value::Object(map)
    }
}

impl fmt::Display for RpcOutcome {
    /// Pretty-printed flat rendering
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(&self.to_value()) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_outcome() {
        let outcome = RpcOutcome::from_raw(200, br#"{"jsonrpc":"2.0","id":1,"result":{}}"#);

        assert_eq!(outcome.status_code(), 200);
        assert_eq!(outcome.result(), Some(&json!({})));
        assert!(outcome.is_success());
        assert!(!outcome.is_error());
        assert_eq!(
            outcome.to_value(),
            json!({"jsonrpc": "2.0", "id": 1, "result": {}, "statusCode": 200})
        );
    }

    #[test]
    fn test_malformed_outcome_flat_shape() {
        let outcome = RpcOutcome::from_raw(502, b"<html>Bad Gateway</html>");

        assert!(outcome.is_malformed());
        assert!(outcome.is_error());
        assert_eq!(outcome.raw_body(), Some(&b"<html>Bad Gateway</html>"[..]));
        assert_eq!(
            outcome.to_value(),
            json!({
                "error": "Invalid JSON response",
                "raw": "<html>Bad Gateway</html>",
                "statusCode": 502
            })
        );
    }

    #[test]
    fn test_unauthorized_plain_error() {
        let outcome = RpcOutcome::from_raw(401, br#"{"error":"Unauthorized"}"#);

        assert!(outcome.is_unauthorized());
        assert!(outcome.is_error());
        assert!(outcome.result().is_none());
        assert!(outcome.error_data().is_none());
        match outcome.result_as::<Value>() {
            Err(Error::Http { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_jsonrpc_error_object() {
        let outcome = RpcOutcome::from_raw(
            200,
            br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found","data":"invalid/method"}}"#,
        );

        let data = outcome.error_data().unwrap();
        assert_eq!(data.code, -32601);
        assert_eq!(data.data, Some(json!("invalid/method")));
        assert!(matches!(outcome.result_as::<Value>(), Err(Error::JsonRpc(_))));

        let response = outcome.into_response().unwrap();
        assert!(response.is_well_formed());
    }

    #[test]
    fn test_result_as_typed() {
        #[derive(serde::Deserialize)]
        struct Pong {}

        let outcome = RpcOutcome::from_raw(200, br#"{"jsonrpc":"2.0","id":1,"result":{}}"#);
        assert!(outcome.result_as::<Pong>().is_ok());
    }

    #[test]
    fn test_result_as_malformed() {
        let outcome = RpcOutcome::from_raw(200, b"not json");
        match outcome.result_as::<Value>() {
            Err(Error::Http { message, .. }) => assert_eq!(message, INVALID_JSON_RESPONSE),
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_code_overrides_body_field() {
        let outcome = RpcOutcome::from_raw(200, br#"{"statusCode":"bogus","result":1}"#);
        assert_eq!(outcome.to_value()["statusCode"], 200);
    }

    #[test]
    fn test_display_is_pretty_json() {
        let outcome = RpcOutcome::from_raw(200, br#"{"result":{}}"#);
        let text = outcome.to_string();
        assert!(text.contains("\"statusCode\": 200"));
        assert!(text.contains('\n'));
    }
}

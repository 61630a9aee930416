//! Authentication descriptors
//!
//! An [`Auth`] names one way of carrying a credential to the server. Each
//! variant maps to exactly one HTTP header:
//!
//! | Variant  | Header                            |
//! |----------|-----------------------------------|
//! | `Bearer` | `Authorization: Bearer <value>`   |
//! | `Basic`  | `Authorization: Basic <value>`    |
//! | `ApiKey` | `X-API-Key: <value>`              |
//!
//! No descriptor means no authentication header at all.
//!
//! `Basic` carries the already-encoded `user:password` pair, which is what
//! servers compare against. Use [`Auth::basic_from_credentials`] to encode
//! raw credentials.
//!
//! # Examples
//!
//! ```rust
//! use mcprobe_client::Auth;
//!
//! let auth = Auth::basic_from_credentials("mcp", "weather");
//! assert_eq!(auth, Auth::Basic("bWNwOndlYXRoZXI=".into()));
//! assert_eq!(auth.scheme(), "basic");
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use mcprobe_core::{Error, Result};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use std::fmt;
use std::str::FromStr;

/// Header used by the API-key scheme
pub const API_KEY_HEADER: &str = "x-api-key";

/// Credential-transport mechanism for one request
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `Authorization: Basic <base64 credentials>`; the value is sent as given
    Basic(String),
    /// `X-API-Key: <key>`
    ApiKey(String),
}

impl Auth {
    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer(token.into())
    }

    /// Basic auth from an already base64-encoded `user:password`
    pub fn basic(encoded: impl Into<String>) -> Self {
        Auth::Basic(encoded.into())
    }

    /// Basic auth from raw credentials, encoded here
    pub fn basic_from_credentials(user: &str, password: &str) -> Self {
        Auth::Basic(BASE64_STANDARD.encode(format!("{}:{}", user, password)))
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        Auth::ApiKey(key.into())
    }

    /// Short scheme name, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            Auth::Bearer(_) => "bearer",
            Auth::Basic(_) => "basic",
            Auth::ApiKey(_) => "api-key",
        }
    }

    /// The credential as configured
    pub fn value(&self) -> &str {
        match self {
            Auth::Bearer(v) | Auth::Basic(v) | Auth::ApiKey(v) => v,
        }
    }

    /// The single header this descriptor contributes to a request
    ///
    /// The value is marked sensitive so it is kept out of `Debug` output of
    /// the underlying HTTP types.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        let (name, text) = match self {
            Auth::Bearer(token) => (AUTHORIZATION, format!("Bearer {}", token)),
            Auth::Basic(encoded) => (AUTHORIZATION, format!("Basic {}", encoded)),
            Auth::ApiKey(key) => (HeaderName::from_static(API_KEY_HEADER), key.clone()),
        };

        let mut value = HeaderValue::from_str(&text).map_err(|_| {
            Error::InvalidHeader(format!("{} credential is not a valid header value", self.scheme()))
        })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Auth::Bearer(_) => "Bearer",
            Auth::Basic(_) => "Basic",
            Auth::ApiKey(_) => "ApiKey",
        };
        write!(f, "{}(<redacted>)", variant)
    }
}

/// Parses `scheme:value`, e.g. `bearer:abc`, `basic:bWNwOndlYXRoZXI=`,
/// `api-key:secret`. Used for command-line and environment input.
impl FromStr for Auth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (scheme, value) = s
            .split_once(':')
            .ok_or_else(|| Error::Config(format!("expected <scheme>:<value>, got '{}'", s)))?;

        match scheme.to_ascii_lowercase().as_str() {
            "bearer" => Ok(Auth::bearer(value)),
            "basic" => Ok(Auth::basic(value)),
            "api-key" | "apikey" => Ok(Auth::api_key(value)),
            other => Err(Error::Config(format!("unknown auth scheme '{}'", other))),
        }
    }
}

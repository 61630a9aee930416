//! Probe scenarios run by the `mcprobe` binary
//!
//! Each scenario issues a fixed sequence of calls and collects the outcomes.
//! A transport failure ends the scenario early with `Err`; anything the
//! server answers, including 401s and JSON-RPC errors, is recorded as a step.

use mcprobe_client::mcp::{CallToolParams, InitializeParams};
use mcprobe_client::{Auth, HttpRpcClient, RpcOutcome};
use mcprobe_core::Result;

pub const DEV_API_KEY: &str = "mcp-weather-api-key-12345";
pub const DEV_BEARER: &str = "bearer-token-abcdef123456";
/// `mcp:weather`, already encoded
pub const DEV_BASIC: &str = "bWNwOndlYXRoZXI=";

pub const INVALID_API_KEY: &str = "invalid-api-key";
pub const INVALID_BEARER: &str = "invalid-bearer-token";

/// One call and what came back
#[derive(Debug, Clone)]
pub struct Step {
    pub label: String,
    pub outcome: RpcOutcome,
}

impl Step {
    fn new(label: impl Into<String>, outcome: RpcOutcome) -> Self {
        Self {
            label: label.into(),
            outcome,
        }
    }
}

/// initialize, tools/list, a weather call, ping and an unknown method
pub async fn standard(client: &HttpRpcClient) -> Result<Vec<Step>> {
    let mut steps = Vec::with_capacity(5);

    let init = InitializeParams::new("mcp-test-client", "1.0.0");
    steps.push(Step::new("initialize", client.initialize(&init, None).await?));
    steps.push(Step::new("tools/list", client.list_tools(None).await?));

    let call = CallToolParams::weather("Paris", "FR");
    steps.push(Step::new(
        "tools/call getWeatherInfo (Paris, FR)",
        client.call_tool(&call, None).await?,
    ));

    steps.push(Step::new("ping", client.ping(None).await?));
    steps.push(Step::new(
        "invalid/method",
        client.call("invalid/method").send().await?,
    ));

    Ok(steps)
}

/// Cities used when none are given
pub fn default_cities() -> Vec<(String, String)> {
    vec![
        ("Vancouver".to_string(), "CA".to_string()),
        ("London".to_string(), "GB".to_string()),
    ]
}

/// initialize and tools/list, then one weather lookup per city
pub async fn weather(client: &HttpRpcClient, cities: &[(String, String)]) -> Result<Vec<Step>> {
    let mut steps = Vec::with_capacity(cities.len() + 2);

    let init = InitializeParams::new("weather-test-client", "1.0.0");
    steps.push(Step::new("initialize", client.initialize(&init, None).await?));
    steps.push(Step::new("tools/list", client.list_tools(None).await?));

    for (city, country) in cities {
        let call = CallToolParams::weather(city, country);
        let outcome = client.call_tool(&call, None).await?;
        steps.push(Step::new(format!("weather {}, {}", city, country), outcome));
    }

    Ok(steps)
}

/// Credentials tried by the authentication matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub bearer: String,
    /// Pre-encoded `user:password`
    pub basic: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_key: DEV_API_KEY.to_string(),
            bearer: DEV_BEARER.to_string(),
            basic: DEV_BASIC.to_string(),
        }
    }
}

/// One row of the authentication matrix
#[derive(Debug, Clone)]
pub struct AuthCheck {
    pub step: Step,
    /// Whether the credentials used should be accepted
    pub expect_accepted: bool,
}

impl AuthCheck {
    /// Anything but 401 counts as accepted
    pub fn accepted(&self) -> bool {
        !self.step.outcome.is_unauthorized()
    }

    pub fn as_expected(&self) -> bool {
        self.accepted() == self.expect_accepted
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthReport {
    pub checks: Vec<AuthCheck>,
}

impl AuthReport {
    pub fn accepted(&self) -> usize {
        self.checks.iter().filter(|c| c.accepted()).count()
    }

    pub fn rejected(&self) -> usize {
        self.checks.len() - self.accepted()
    }

    /// Checks whose result differs from what the credentials imply
    pub fn unexpected(&self) -> Vec<&AuthCheck> {
        self.checks.iter().filter(|c| !c.as_expected()).collect()
    }

    fn push(&mut self, label: &str, outcome: RpcOutcome, expect_accepted: bool) {
        self.checks.push(AuthCheck {
            step: Step::new(label, outcome),
            expect_accepted,
        });
    }
}

/// Run the authentication matrix
///
/// Anonymous access is recorded as expected-accepted; servers that require
/// credentials will show it as unexpected.
pub async fn auth_matrix(client: &HttpRpcClient, credentials: &Credentials) -> Result<AuthReport> {
    let mut report = AuthReport::default();
    let init = InitializeParams::new("auth-test-client", "1.0.0");

    let api_key = Auth::api_key(credentials.api_key.as_str());
    let bearer = Auth::bearer(credentials.bearer.as_str());
    let basic = Auth::basic(credentials.basic.as_str());
    let bad_key = Auth::api_key(INVALID_API_KEY);
    let bad_bearer = Auth::bearer(INVALID_BEARER);

    report.push("no auth", client.initialize(&init, None).await?, true);
    report.push(
        "valid api key",
        client.initialize(&init, Some(&api_key)).await?,
        true,
    );
    report.push("valid bearer", client.list_tools(Some(&bearer)).await?, true);
    report.push("valid basic", client.list_tools(Some(&basic)).await?, true);
    report.push(
        "invalid api key",
        client.list_tools(Some(&bad_key)).await?,
        false,
    );
    report.push(
        "invalid bearer",
        client.list_tools(Some(&bad_bearer)).await?,
        false,
    );

    let call = CallToolParams::weather("Tokyo", "JP");
    report.push(
        "tools/call with api key (Tokyo, JP)",
        client.call_tool(&call, Some(&api_key)).await?,
        true,
    );

    tracing::info!(
        accepted = report.accepted(),
        rejected = report.rejected(),
        "Authentication matrix finished"
    );
    Ok(report)
}

//! mcprobe - exercise an MCP server over JSON-RPC/HTTP
//!
//! # Usage
//!
//! ```bash
//! # initialize, tools/list, tools/call, ping, unknown method
//! mcprobe standard
//!
//! # weather lookups for the given cities
//! mcprobe --port 9090 weather --city Oslo --country NO --city Lima --country PE
//!
//! # authentication matrix with the development credentials
//! mcprobe auth
//!
//! # a single request
//! mcprobe call tools/call --params '{"name":"getWeatherInfo","arguments":{"name":"Paris","countrycode":"FR"}}' --api-key mcp-weather-api-key-12345
//! ```
//!
//! The endpoint defaults to `MCPROBE_HOST`/`MCPROBE_PORT`, then
//! `localhost:8080`.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mcprobe::core::ObservabilityConfig;
use mcprobe::probe::{self, Credentials, Step};
use mcprobe::{Auth, ClientBuilder, ClientConfig, HttpRpcClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "Probe an MCP server over JSON-RPC/HTTP", long_about = None)]
struct Cli {
    /// Server host [env: MCPROBE_HOST, default: localhost]
    #[arg(long, global = true)]
    host: Option<String>,

    /// Server port [env: MCPROBE_PORT, default: 8080]
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Log filter, e.g. `debug` or `mcprobe_client=trace`
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Export traces and metrics over OTLP
    #[arg(long, global = true)]
    otlp: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Standard MCP sequence against the weather server
    Standard,

    /// Weather lookups, one per --city/--country pair
    Weather {
        #[arg(long = "city")]
        cities: Vec<String>,

        #[arg(long = "country")]
        countries: Vec<String>,
    },

    /// Authentication matrix with valid and invalid credentials
    Auth {
        #[arg(long, default_value = probe::DEV_API_KEY)]
        api_key: String,

        #[arg(long, default_value = probe::DEV_BEARER)]
        bearer: String,

        /// Pre-encoded basic credentials
        #[arg(long, default_value = probe::DEV_BASIC)]
        basic: String,
    },

    /// Send a single request
    Call {
        method: String,

        /// Params as a JSON object
        #[arg(long)]
        params: Option<String>,

        #[arg(long, default_value_t = mcprobe::client::DEFAULT_ID)]
        id: i64,

        #[command(flatten)]
        credential: CredentialArgs,
    },
}

/// At most one credential per request
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct CredentialArgs {
    #[arg(long)]
    bearer: Option<String>,

    /// Pre-encoded basic credentials
    #[arg(long)]
    basic: Option<String>,

    #[arg(long)]
    api_key: Option<String>,
}

impl CredentialArgs {
    fn into_auth(self) -> Option<Auth> {
        self.bearer
            .map(Auth::bearer)
            .or(self.basic.map(Auth::basic))
            .or(self.api_key.map(Auth::api_key))
    }
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("reading endpoint from environment")?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        Ok(config)
    }

    fn observability(&self) -> ObservabilityConfig {
        ObservabilityConfig::new("mcprobe")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_log_level(self.log_level.clone())
            .with_json_logs(self.json_logs)
            .with_export(self.otlp)
    }
}

fn pair_cities(cities: Vec<String>, countries: Vec<String>) -> Result<Vec<(String, String)>> {
    if cities.is_empty() && countries.is_empty() {
        return Ok(probe::default_cities());
    }
    if cities.len() != countries.len() {
        bail!(
            "every --city needs a matching --country ({} cities, {} countries)",
            cities.len(),
            countries.len()
        );
    }
    Ok(cities.into_iter().zip(countries).collect())
}

fn parse_params(params: Option<&str>) -> Result<serde_json::Value> {
    match params {
        None => Ok(serde_json::json!({})),
        Some(text) => serde_json::from_str(text).context("--params is not valid JSON"),
    }
}

fn print_steps(steps: &[Step]) {
    for step in steps {
        println!("== {}", step.label);
        println!("{}", step.outcome);
    }
}

async fn run(cli: Cli, client: &HttpRpcClient) -> Result<()> {
    match cli.command {
        Command::Standard => {
            let steps = probe::standard(client)
                .await
                .context("standard sequence aborted")?;
            print_steps(&steps);
        }
        Command::Weather { cities, countries } => {
            let cities = pair_cities(cities, countries)?;
            let steps = probe::weather(client, &cities)
                .await
                .context("weather sequence aborted")?;
            print_steps(&steps);
        }
        Command::Auth {
            api_key,
            bearer,
            basic,
        } => {
            let credentials = Credentials {
                api_key,
                bearer,
                basic,
            };
            let report = probe::auth_matrix(client, &credentials)
                .await
                .context("authentication matrix aborted")?;

            for check in &report.checks {
                let verdict = if check.accepted() { "accepted" } else { "rejected" };
                let flag = if check.as_expected() { "" } else { " (unexpected)" };
                println!("== {}: {}{}", check.step.label, verdict, flag);
                println!("{}", check.step.outcome);
            }
            println!(
                "{} accepted, {} rejected, {} unexpected",
                report.accepted(),
                report.rejected(),
                report.unexpected().len()
            );
        }
        Command::Call {
            method,
            params,
            id,
            credential,
        } => {
            let params = parse_params(params.as_deref())?;
            let outcome = client
                .call(method.as_str())
                .params(params)
                .id(id)
                .maybe_auth(credential.into_auth())
                .send()
                .await
                .with_context(|| format!("{} failed", method))?;
            println!("{}", outcome);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.client_config()?;
    let client = ClientBuilder::new()
        .config(config)
        .with_observability(cli.observability())
        .build()
        .context("building client")?;

    tracing::info!(endpoint = %client.endpoint(), "Probing server");

    let result = run(cli, &client).await;
    mcprobe::core::shutdown_observability();
    result
}

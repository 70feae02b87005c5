//! Configuration resolution.
//!
//! Settings resolve per-field with CLI > environment > TOML file > compiled
//! default priority. Secrets (the store API key and the two write tokens)
//! have no compiled default and must be configured, via environment variable
//! or config file. The resolved [`Config`] is immutable for the life of the
//! process.

use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Data API base URL of the deployment's Atlas cluster.
const DEFAULT_STORE_URL: &str = "https://data.mongodb-api.com/app/data-dllci/endpoint/data/v1";
const DEFAULT_DATABASE: &str = "prod";
const DEFAULT_DATA_SOURCE: &str = "Cluster0";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

use crate::store::StoreConfig;

#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(String);

/// Command-line surface.
#[derive(Debug, Parser)]
#[command(name = "station-api", version, about = "Weather station REST API")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "STATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Socket address to bind the HTTP server to
    #[arg(long, env = "STATION_BIND")]
    pub bind: Option<SocketAddr>,
}

/// Shared-secret path tokens, one per writable collection.
#[derive(Debug, Clone)]
pub struct Tokens {
    pub measurement: String,
    pub prediction: String,
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub store: StoreConfig,
    pub tokens: Tokens,
}

/// TOML file layout; every field optional so the file can carry only the
/// settings that differ from the defaults.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind: Option<SocketAddr>,
    #[serde(default)]
    store: FileStore,
    #[serde(default)]
    tokens: FileTokens,
}

#[derive(Debug, Default, Deserialize)]
struct FileStore {
    base_url: Option<String>,
    api_key: Option<String>,
    database: Option<String>,
    data_source: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileTokens {
    measurement: Option<String>,
    prediction: Option<String>,
}

impl Config {
    /// Resolve the full configuration from CLI arguments, environment
    /// variables and the optional TOML file.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    ConfigError(format!("cannot read {}: {}", path.display(), e))
                })?;
                let parsed: FileConfig = toml::from_str(&content).map_err(|e| {
                    ConfigError(format!("cannot parse {}: {}", path.display(), e))
                })?;
                info!(path = %path.display(), "configuration file loaded");
                parsed
            }
            None => FileConfig::default(),
        };

        let bind = cli
            .bind
            .or(file.bind)
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8000)));

        let timeout_secs = match std::env::var("STATION_STORE_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                ConfigError(format!("STATION_STORE_TIMEOUT_SECS is not a number: {v:?}"))
            })?,
            Err(_) => file.store.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let store = StoreConfig {
            base_url: setting("STATION_STORE_URL", file.store.base_url)
                .unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
            api_key: setting("STATION_STORE_API_KEY", file.store.api_key)
                .ok_or_else(|| missing_secret("store API key", "STATION_STORE_API_KEY", "store.api_key"))?,
            database: setting("STATION_STORE_DATABASE", file.store.database)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            data_source: setting("STATION_STORE_DATA_SOURCE", file.store.data_source)
                .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string()),
            timeout_secs,
        };

        let tokens = Tokens {
            measurement: setting("STATION_MEASUREMENT_TOKEN", file.tokens.measurement)
                .ok_or_else(|| {
                    missing_secret("measurement token", "STATION_MEASUREMENT_TOKEN", "tokens.measurement")
                })?,
            prediction: setting("STATION_PREDICTION_TOKEN", file.tokens.prediction)
                .ok_or_else(|| {
                    missing_secret("prediction token", "STATION_PREDICTION_TOKEN", "tokens.prediction")
                })?,
        };

        Ok(Config { bind, store, tokens })
    }
}

/// Environment variable if set and non-blank, otherwise the file value.
fn setting(env_name: &str, file_value: Option<String>) -> Option<String> {
    std::env::var(env_name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or(file_value)
}

fn missing_secret(what: &str, env_name: &str, toml_key: &str) -> ConfigError {
    ConfigError(format!(
        "{what} not configured. Set the {env_name} environment variable \
         or add {toml_key} to the configuration file."
    ))
}

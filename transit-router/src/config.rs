//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::routing::{RoutingConfig, RoutingConfigError};

pub const ENV_ADDR: &str = "TRANSIT_ROUTER_ADDR";
pub const ENV_DATA: &str = "TRANSIT_ROUTER_DATA";
pub const ENV_RELOAD_SECS: &str = "TRANSIT_ROUTER_RELOAD_SECS";
pub const ENV_RUSH_MULTIPLIER: &str = "TRANSIT_ROUTER_RUSH_MULTIPLIER";
pub const ENV_MAX_EXPANSIONS: &str = "TRANSIT_ROUTER_MAX_EXPANSIONS";
pub const ENV_MAX_SEARCH_MS: &str = "TRANSIT_ROUTER_MAX_SEARCH_MS";
pub const ENV_PARALLEL_COMPARE: &str = "TRANSIT_ROUTER_PARALLEL_COMPARE";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
const DEFAULT_DATA: &str = "data/subway_travel_times.csv";

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed
    #[error("{var}={value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Routing(#[from] RoutingConfigError),
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Dataset file, `.csv` or `.json`.
    pub data_path: PathBuf,

    /// Periodic reload interval; `None` disables periodic reloads.
    pub reload_interval: Option<Duration>,

    pub routing: RoutingConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    ///
    /// Blank values count as unset. A `TRANSIT_ROUTER_MAX_SEARCH_MS` or
    /// `TRANSIT_ROUTER_RELOAD_SECS` of `0` disables that limit or task.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RoutingConfig::default();

        let bind_addr = parse(ENV_ADDR, get(ENV_ADDR))?
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_ADDR));

        let data_path = get(ENV_DATA)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA));

        let reload_interval = parse::<u64>(ENV_RELOAD_SECS, get(ENV_RELOAD_SECS))?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let rush_multiplier = parse(ENV_RUSH_MULTIPLIER, get(ENV_RUSH_MULTIPLIER))?
            .unwrap_or(defaults.rush_multiplier);

        let max_expansions = parse(ENV_MAX_EXPANSIONS, get(ENV_MAX_EXPANSIONS))?;

        let max_search_ms = match parse::<u64>(ENV_MAX_SEARCH_MS, get(ENV_MAX_SEARCH_MS))? {
            Some(0) => None,
            Some(ms) => Some(ms),
            None => defaults.max_search_ms,
        };

        let parallel_compare = match get(ENV_PARALLEL_COMPARE) {
            Some(v) => parse_bool(ENV_PARALLEL_COMPARE, &v)?,
            None => defaults.parallel_compare,
        };

        let routing = RoutingConfig {
            rush_multiplier,
            max_expansions,
            max_search_ms,
            parallel_compare,
            ..defaults
        };
        routing.validate()?;

        Ok(Self {
            bind_addr,
            data_path,
            reload_interval,
            routing,
        })
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .map(|v| v.trim().parse::<T>().map_err(|e| invalid(var, &v, e)))
        .transpose()
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, value, "expected true or false")),
    }
}

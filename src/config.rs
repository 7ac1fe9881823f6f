use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";
pub const LIVE_BASE_URL: &str = "https://fapi.binance.com";

const PLACEHOLDER_KEY: &str = "your_api_key_here";
const PLACEHOLDER_SECRET: &str = "your_api_secret_here";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("{0} still holds the placeholder value")]
    PlaceholderCredential(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Inclusive bounds every order quantity must fall into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderLimits {
    pub min_quantity: f64,
    pub max_quantity: f64,
}

impl Default for OrderLimits {
    fn default() -> Self {
        Self {
            min_quantity: 0.001,
            max_quantity: 100.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_secret: String,
    pub testnet: bool,
    pub base_url: String,
    pub recv_window: u64,
    pub http_timeout: Duration,

    pub default_symbol: String,
    pub limits: OrderLimits,

    pub log_file: PathBuf,
    pub log_level: String,
}

impl Settings {
    /// Refuses unset, empty, or placeholder credentials.
    pub fn check_credentials(&self) -> Result<(), ConfigError> {
        check_credential("API_KEY", &self.api_key, PLACEHOLDER_KEY)?;
        check_credential("API_SECRET", &self.api_secret, PLACEHOLDER_SECRET)
    }
}

fn check_credential(key: &'static str, value: &str, placeholder: &str) -> Result<(), ConfigError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ConfigError::MissingCredential(key));
    }
    if v == placeholder {
        return Err(ConfigError::PlaceholderCredential(key));
    }
    Ok(())
}

pub fn load() -> Result<Settings, ConfigError> {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    from_lookup(|key| env::var(key).ok())
}

/// Builds settings from any key lookup. `load` feeds it the process environment.
pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let api_key = get("API_KEY").unwrap_or_default();
    let api_secret = get("API_SECRET").unwrap_or_default();

    let testnet = match get("TESTNET") {
        Some(v) => parse_bool("TESTNET", &v)?,
        None => true,
    };

    let base_url = get("BINANCE_BASE_URL")
        .unwrap_or_else(|| {
            if testnet {
                TESTNET_BASE_URL.to_string()
            } else {
                LIVE_BASE_URL.to_string()
            }
        })
        .trim_end_matches('/')
        .to_string();

    let recv_window = parse_or("RECV_WINDOW", get("RECV_WINDOW"), 5_000u64)?;
    let timeout_secs = parse_or("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), 10u64)?;

    let default_symbol = get("DEFAULT_SYMBOL")
        .unwrap_or_else(|| "BTCUSDT".to_string())
        .to_uppercase();

    let defaults = OrderLimits::default();
    let limits = OrderLimits {
        min_quantity: parse_or("MIN_QUANTITY", get("MIN_QUANTITY"), defaults.min_quantity)?,
        max_quantity: parse_or("MAX_QUANTITY", get("MAX_QUANTITY"), defaults.max_quantity)?,
    };
    if !(limits.min_quantity > 0.0 && limits.min_quantity <= limits.max_quantity) {
        return Err(ConfigError::Invalid {
            key: "MIN_QUANTITY",
            value: format!("{} (max {})", limits.min_quantity, limits.max_quantity),
        });
    }

    let log_file = get("LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs/trading_bot.log"));
    let log_level = get("LOG_LEVEL")
        .unwrap_or_else(|| "info".to_string())
        .to_lowercase();

    Ok(Settings {
        api_key,
        api_secret,
        testnet,
        base_url,
        recv_window,
        http_timeout: Duration::from_secs(timeout_secs),
        default_symbol,
        limits,
        log_file,
        log_level,
    })
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.parse::<T>().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}

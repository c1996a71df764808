use std::env::{self, VarError};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{configuration_error, Error};

const DEFAULT_MAPS_API_BASE: &str = "maps.googleapis.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub maps_api_base: String,
    pub maps_api_key: String,
    pub ride_api_base: String,
    pub history_dir: PathBuf,
    pub request_timeout: Duration,
    pub quote_max_retries: u32,
    /// Zero retries the quoting backend immediately.
    pub quote_retry_backoff: Duration,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Ok(Self {
            maps_api_base: env_or("GOOGLE_MAPS_API_BASE", DEFAULT_MAPS_API_BASE)?,
            maps_api_key: env("GOOGLE_MAPS_API_KEY")?,
            ride_api_base: env("RIDE_API_BASE")?,
            history_dir: env_or("TRIP_HISTORY_DIR", ".")?.into(),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 10)?),
            quote_max_retries: parse_env("QUOTE_MAX_RETRIES", 3)?,
            quote_retry_backoff: Duration::from_millis(parse_env("QUOTE_RETRY_BACKOFF_MS", 0)?),
            listen_addr: parse_env("LISTEN_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
        })
    }
}

/// Accepts either a bare host, as `GOOGLE_MAPS_API_BASE` is usually given, or a
/// full URL with scheme.
pub fn base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn env(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|e| match e {
        VarError::NotPresent => configuration_error(format!("{} not set", name)),
        VarError::NotUnicode(_) => {
            configuration_error(format!("{} value is not valid unicode", name))
        }
    })
}

fn env_or(name: &str, default: &str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e.into()),
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| configuration_error(format!("{}={:?}: {}", name, value, e))),
        Err(VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}

//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CORNERSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `CORNERSHOP_PORT` - Listen port (default: 3000)
//! - `CORNERSHOP_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `CORNERSHOP_CATALOG_PATH` - JSON catalog file; the built-in catalog is used when unset
//! - `CORNERSHOP_CART_CAPACITY` - Maximum number of live carts (default: 10000)
//! - `CORNERSHOP_CART_IDLE_SECS` - Idle time before a cart is dropped, 1s to 365 days (default: 7 days)
//! - `CORNERSHOP_CHECKOUT_DELAY_MS` - Simulated checkout latency (default: 2000)
//! - `CORNERSHOP_CONTACT_DELAY_MS` - Simulated contact form latency (default: 1500)
//! - `CORNERSHOP_LOG_FORMAT` - `json` for JSON logs, anything else for plain text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CART_CAPACITY: u64 = 10_000;
const DEFAULT_CART_IDLE_SECS: u64 = 7 * 24 * 60 * 60;
const MAX_CART_IDLE_SECS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;
const DEFAULT_CONTACT_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Optional JSON catalog replacing the built-in products
    pub catalog_path: Option<PathBuf>,
    /// Cart registry sizing
    pub carts: CartConfig,
    /// Simulated latency for checkout and contact submission
    pub simulation: SimulationConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Cart registry configuration.
#[derive(Debug, Clone, Copy)]
pub struct CartConfig {
    /// Maximum number of carts kept in memory
    pub capacity: u64,
    /// Carts untouched for this long are dropped
    pub idle_timeout: Duration,
}

/// Simulated network latency for operations with no real backend.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub checkout_delay: Duration,
    pub contact_delay: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CART_CAPACITY,
            idle_timeout: Duration::from_secs(DEFAULT_CART_IDLE_SECS),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            checkout_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
            contact_delay: Duration::from_millis(DEFAULT_CONTACT_DELAY_MS),
        }
    }
}

impl SimulationConfig {
    /// No artificial latency. Used by tests.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            checkout_delay: Duration::ZERO,
            contact_delay: Duration::ZERO,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: default_base_url(),
            catalog_path: None,
            carts: CartConfig::default(),
            simulation: SimulationConfig::default(),
            log_format: LogFormat::Plain,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

#[allow(clippy::expect_used)] // Literal URL, checked by tests
fn default_base_url() -> Url {
    Url::parse("http://localhost:3000").expect("default base URL is valid")
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = match get("CORNERSHOP_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| invalid("CORNERSHOP_BASE_URL", e))?,
            None => defaults.base_url,
        };

        let carts = CartConfig {
            capacity: parse_in_range(
                "CORNERSHOP_CART_CAPACITY",
                get("CORNERSHOP_CART_CAPACITY"),
                DEFAULT_CART_CAPACITY,
                1..=u64::MAX,
            )?,
            idle_timeout: Duration::from_secs(parse_in_range(
                "CORNERSHOP_CART_IDLE_SECS",
                get("CORNERSHOP_CART_IDLE_SECS"),
                DEFAULT_CART_IDLE_SECS,
                1..=MAX_CART_IDLE_SECS,
            )?),
        };

        let simulation = SimulationConfig {
            checkout_delay: Duration::from_millis(parse_or(
                "CORNERSHOP_CHECKOUT_DELAY_MS",
                get("CORNERSHOP_CHECKOUT_DELAY_MS"),
                DEFAULT_CHECKOUT_DELAY_MS,
            )?),
            contact_delay: Duration::from_millis(parse_or(
                "CORNERSHOP_CONTACT_DELAY_MS",
                get("CORNERSHOP_CONTACT_DELAY_MS"),
                DEFAULT_CONTACT_DELAY_MS,
            )?),
        };

        let log_format = match get("CORNERSHOP_LOG_FORMAT").as_deref() {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Plain,
        };

        let sentry_sample_rate =
            parse_rate("SENTRY_SAMPLE_RATE", get("SENTRY_SAMPLE_RATE"), defaults.sentry_sample_rate)?;
        let sentry_traces_sample_rate = parse_rate(
            "SENTRY_TRACES_SAMPLE_RATE",
            get("SENTRY_TRACES_SAMPLE_RATE"),
            defaults.sentry_traces_sample_rate,
        )?;

        Ok(Self {
            host: parse_or("CORNERSHOP_HOST", get("CORNERSHOP_HOST"), defaults.host)?,
            port: parse_or("CORNERSHOP_PORT", get("CORNERSHOP_PORT"), defaults.port)?,
            base_url,
            catalog_path: get("CORNERSHOP_CATALOG_PATH").map(PathBuf::from),
            carts,
            simulation,
            log_format,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse a variable if present, otherwise fall back to `default`.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.map_or(Ok(default), |value| {
        value.trim().parse::<T>().map_err(|e| invalid(key, e))
    })
}

/// Parse a variable that must fall within `range`.
fn parse_in_range<T>(
    key: &str,
    raw: Option<String>,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + std::fmt::Display,
    T::Err: ToString,
{
    let value = parse_or(key, raw, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(invalid(
            key,
            format!("{value} is outside {}..={}", range.start(), range.end()),
        ))
    }
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate(key: &str, raw: Option<String>, default: f32) -> Result<f32, ConfigError> {
    parse_in_range(key, raw, default, 0.0..=1.0)
}

//! Bot configuration
//!
//! Secrets and tunables are read from command-line flags, falling back to
//! environment variables (a `.env` file is loaded first if present).

use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use homework_client::{DEFAULT_API_URL, DEFAULT_ENDPOINT};

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "homework-bot")]
#[command(about = "Notifies a Telegram chat when a homework review status changes", long_about = None)]
pub struct Args {
    /// OAuth token for the homework review API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    pub practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat that receives notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Seconds to wait between polls
    #[arg(long, env = "HOMEWORK_RETRY_INTERVAL", default_value_t = 600)]
    pub retry_interval: u64,

    /// Timeout in seconds for every outbound HTTP request
    #[arg(long, env = "HOMEWORK_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Homework statuses endpoint
    #[arg(long, env = "HOMEWORK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_URL)]
    pub telegram_api_url: String,

    /// Initial `from_date` cursor (epoch seconds); defaults to now
    #[arg(long, env = "HOMEWORK_FROM_DATE")]
    pub from_date: Option<u64>,

    /// Directory for daily-rolling log files
    #[arg(long, env = "HOMEWORK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,
}

/// Fatal configuration problems, detected before the first poll
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{name} must start with http:// or https:// (got `{value}`)")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{0} must be greater than 0")]
    ZeroDuration(&'static str),
}

/// Validated bot configuration
///
/// Built once at startup and handed to the poller by reference.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub retry_interval: Duration,
    pub request_timeout: Duration,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub from_date: Option<u64>,
    pub once: bool,
}

impl Config {
    /// Builds and validates the configuration from parsed arguments
    ///
    /// Every absent or blank secret is reported at once.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let practicum_token = required(args.practicum_token, "PRACTICUM_TOKEN", &mut missing);
        let telegram_token = required(args.telegram_token, "TELEGRAM_TOKEN", &mut missing);
        let telegram_chat_id = required(args.telegram_chat_id, "TELEGRAM_CHAT_ID", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let config = Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            retry_interval: Duration::from_secs(args.retry_interval),
            request_timeout: Duration::from_secs(args.request_timeout),
            endpoint: args.endpoint,
            telegram_api_url: args.telegram_api_url,
            from_date: args.from_date,
            once: args.once,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("HOMEWORK_ENDPOINT", &self.endpoint)?;
        check_url("TELEGRAM_API_URL", &self.telegram_api_url)?;

        if self.retry_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("HOMEWORK_RETRY_INTERVAL"));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("HOMEWORK_REQUEST_TIMEOUT"));
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("retry_interval", &self.retry_interval)
            .field("request_timeout", &self.request_timeout)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("from_date", &self.from_date)
            .field("once", &self.once)
            .finish()
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        })
    }
}

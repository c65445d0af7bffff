use clap::{Args, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::api::{ClientConfig, DEFAULT_BASE_URL, SortOrder};
use crate::board::BoardConfig;
use crate::domain::Role;

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the job tracker API
    #[arg(long, global = true, env = "JOB_TRACKER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "JOB_TRACKER_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[arg(long, global = true, env = "JOB_TRACKER_CONNECT_TIMEOUT_SECS", default_value = "5")]
    pub connect_timeout_secs: u64,

    /// Jobs per page
    #[arg(long, global = true, env = "JOB_TRACKER_PAGE_SIZE", default_value = "10")]
    pub page_size: u32,

    /// Field the server sorts the list by
    #[arg(long, global = true, env = "JOB_TRACKER_SORT_BY", default_value = "createdAt")]
    pub sort_by: String,

    /// Sort direction
    #[arg(long, global = true, env = "JOB_TRACKER_SORT_ORDER", default_value = "desc", ignore_case = true)]
    pub sort_order: SortOrder,

    /// View to act in
    #[arg(id = "view", long = "view", global = true, env = "JOB_TRACKER_ROLE", default_value = "user", ignore_case = true)]
    pub role: Role,

    /// Log level
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info", ignore_case = true)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "pretty", ignore_case = true)]
    pub log_format: LogFormat,

    /// Configuration file path (optional)
    #[arg(long = "config", global = true, env = "JOB_TRACKER_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Derived fields (not CLI arguments)
    #[serde(skip)]
    #[arg(skip)]
    pub timeout: Duration,

    #[serde(skip)]
    #[arg(skip)]
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            page_size: 10,
            sort_by: "createdAt".to_string(),
            sort_order: SortOrder::Desc,
            role: Role::User,
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
            config_file: None,
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "job-tracker")]
struct ConfigArgs {
    #[command(flatten)]
    config: Config,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = ConfigArgs::try_parse_from(args)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?
            .config;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string("JOB_TRACKER_API_URL", &mut config.api_url);
        load_env_var("JOB_TRACKER_TIMEOUT_SECS", &mut config.timeout_secs)?;
        load_env_var("JOB_TRACKER_CONNECT_TIMEOUT_SECS", &mut config.connect_timeout_secs)?;
        load_env_var("JOB_TRACKER_PAGE_SIZE", &mut config.page_size)?;
        load_env_string("JOB_TRACKER_SORT_BY", &mut config.sort_by);
        load_env_enum("JOB_TRACKER_SORT_ORDER", &mut config.sort_order)?;
        load_env_enum("JOB_TRACKER_ROLE", &mut config.role)?;
        load_env_enum("LOG_LEVEL", &mut config.log_level)?;
        load_env_enum("LOG_FORMAT", &mut config.log_format)?;
        load_env_path_opt("JOB_TRACKER_CONFIG", &mut config.config_file);

        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    /// Swap in the file named by `config_file`, if any; otherwise finish
    /// this configuration as parsed.
    pub fn resolve(mut self) -> Result<Self, ConfigError> {
        if let Some(path) = self.config_file.clone() {
            let mut from_file = Config::from_file(&path)?;
            from_file.config_file = Some(path);
            return Ok(from_file);
        }
        self.post_process()?;
        self.validate()?;
        Ok(self)
    }

    pub fn post_process(&mut self) -> Result<(), ConfigError> {
        self.timeout = Duration::from_secs(self.timeout_secs);
        self.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid API URL '{}': {}", self.api_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL '{}' must use http or https",
                self.api_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Connection timeout must be greater than 0".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidConfig(format!(
                "Page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }

        if self.sort_by.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Sort field cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
            connection_timeout: self.connect_timeout,
            ..ClientConfig::default()
        }
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig {
            page_size: self.page_size,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
        }
    }
}

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Case-insensitive parse of a clap value enum.
fn load_env_enum<T: ValueEnum>(name: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(name) {
        *target = T::from_str(&value, true)
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(PathBuf::from(value));
    }
}

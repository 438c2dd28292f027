//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `pn2133.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use pn2133_adapter_http_reqwest::HttpConfig;
use pn2133_app::polling::PollingConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reader connection settings.
    pub device: DeviceConfig,
    /// Polling periods.
    pub polling: PollingSection,
    /// Log export settings.
    pub export: ExportConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Reader connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Base URL of the reader (e.g. `http://192.168.4.1`).
    pub url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Polling periods in milliseconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingSection {
    pub entropy_ms: u64,
    pub logs_ms: u64,
    pub clock_ms: u64,
}

/// Where exported log files are written.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `pn2133.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("pn2133.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PN2133_DEVICE_URL") {
            self.device.url = val;
        }
        if let Ok(val) = std::env::var("PN2133_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.device.timeout_ms = timeout;
            }
        }
        if let Ok(val) = std::env::var("PN2133_EXPORT_DIR") {
            self.export.dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("PN2133_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "device url must not be empty".to_string(),
            ));
        }
        if self.device.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "device timeout must be non-zero".to_string(),
            ));
        }
        let periods = [
            ("entropy", self.polling.entropy_ms),
            ("logs", self.polling.logs_ms),
            ("clock", self.polling.clock_ms),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::Validation(format!(
                "{name} polling period must be non-zero"
            )));
        }
        Ok(())
    }

    /// Connection settings for the HTTP adapter.
    #[must_use]
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.device.url.clone(),
            timeout_ms: self.device.timeout_ms,
        }
    }

    /// Periods for the polling scheduler.
    #[must_use]
    pub fn polling(&self) -> PollingConfig {
        PollingConfig {
            entropy: Duration::from_millis(self.polling.entropy_ms),
            logs: Duration::from_millis(self.polling.logs_ms),
            clock: Duration::from_millis(self.polling.clock_ms),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let http = HttpConfig::default();
        Self {
            url: http.base_url,
            timeout_ms: http.timeout_ms,
        }
    }
}

impl Default for PollingSection {
    fn default() -> Self {
        Self {
            entropy_ms: 500,
            logs_ms: 2000,
            clock_ms: 1000,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: [
                "pn2133=info",
                "pn2133_app=info",
                "pn2133_adapter_http_reqwest=info",
                "pn2133_adapter_headless=info",
            ]
            .join(","),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

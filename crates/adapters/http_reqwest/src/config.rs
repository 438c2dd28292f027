//! Device connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default reader address when it runs its own access point.
pub const DEFAULT_BASE_URL: &str = "http://192.168.4.1";
/// Default per-request bound.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Where the reader lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Scheme, host and optional path prefix; `/api/...` is appended.
    pub base_url: String,
    /// Bound on every request, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

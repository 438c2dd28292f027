//! Settings: the device configuration mirrored by the dashboard.
//!
//! The authoritative copy lives on the device. The client keeps a cached
//! mirror that is overwritten wholesale on every successful fetch or save;
//! it never merges partial objects into the cache.

use serde::{Deserialize, Serialize};

/// Default scan interval in milliseconds.
pub const DEFAULT_SCAN_INTERVAL_MS: u32 = 1000;

/// Default entropy anomaly threshold.
pub const DEFAULT_ENTROPY_THRESHOLD: u32 = 50;

/// Full device settings object.
///
/// [`Settings::default`] is the reset literal applied by the dashboard's
/// "reset" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Record every scan without explicit user action.
    pub silent_logging: bool,
    /// Background scan period in milliseconds.
    pub scan_interval: u32,
    /// Deviation above which an entropy sample counts as an anomaly.
    pub entropy_threshold: u32,
    /// Whether the device samples entropy at all.
    pub entropy_monitoring: bool,
    /// Remote log sink URL.
    #[serde(alias = "supabase_url")]
    pub remote_url: String,
    /// Remote log sink API key.
    #[serde(alias = "supabase_key")]
    pub remote_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            silent_logging: false,
            scan_interval: DEFAULT_SCAN_INTERVAL_MS,
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            entropy_monitoring: true,
            remote_url: String::new(),
            remote_key: String::new(),
        }
    }
}

/// Fast-path partial update fired straight from a control change.
///
/// Only the two fast-path fields exist here; absent fields are omitted
/// from the JSON body so the device leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silent_logging: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_interval: Option<u32>,
}

impl SettingsPatch {
    /// Patch that only flips silent logging.
    #[must_use]
    pub fn silent_logging(enabled: bool) -> Self {
        Self {
            silent_logging: Some(enabled),
            scan_interval: None,
        }
    }

    /// Patch that only changes the scan interval.
    #[must_use]
    pub fn scan_interval(interval_ms: u32) -> Self {
        Self {
            silent_logging: None,
            scan_interval: Some(interval_ms),
        }
    }
}

/// Display state of the silent-logging indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    Active,
    Disabled,
}

impl LoggingMode {
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Active } else { Self::Disabled }
    }

    /// Indicator text (`ACTIVE` / `DISABLED`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Disabled => "DISABLED",
        }
    }

    /// CSS class list for the indicator.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Active => "status-text enabled",
            Self::Disabled => "status-text disabled",
        }
    }
}

//! Settings form: explicit in-memory model of the settings controls.
//!
//! The form, not the render target, is the source of truth for "save".
//! Numeric controls hold the text the user typed; it is validated only when
//! the form is turned back into a [`Settings`] object.

use pn2133_domain::error::ValidationError;
use pn2133_domain::settings::Settings;

/// Current values of every settings control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub silent_logging: bool,
    pub scan_interval: String,
    pub entropy_threshold: String,
    pub entropy_monitoring: bool,
    pub remote_url: String,
    pub remote_key: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl SettingsForm {
    /// Write a full settings object into the controls.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            silent_logging: settings.silent_logging,
            scan_interval: settings.scan_interval.to_string(),
            entropy_threshold: settings.entropy_threshold.to_string(),
            entropy_monitoring: settings.entropy_monitoring,
            remote_url: settings.remote_url.clone(),
            remote_key: settings.remote_key.clone(),
        }
    }

    /// Read every control into one full settings object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidNumber`] when a numeric control does
    /// not hold a non-negative integer.
    pub fn to_settings(&self) -> Result<Settings, ValidationError> {
        Ok(Settings {
            silent_logging: self.silent_logging,
            scan_interval: parse_number("scan_interval", &self.scan_interval)?,
            entropy_threshold: parse_number("entropy_threshold", &self.entropy_threshold)?,
            entropy_monitoring: self.entropy_monitoring,
            remote_url: self.remote_url.trim().to_string(),
            remote_key: self.remote_key.trim().to_string(),
        })
    }

    /// Apply one control edit.
    pub fn apply(&mut self, edit: SettingsEdit) {
        match edit {
            SettingsEdit::SilentLogging(v) => self.silent_logging = v,
            SettingsEdit::ScanInterval(v) => self.scan_interval = v,
            SettingsEdit::EntropyThreshold(v) => self.entropy_threshold = v,
            SettingsEdit::EntropyMonitoring(v) => self.entropy_monitoring = v,
            SettingsEdit::RemoteUrl(v) => self.remote_url = v,
            SettingsEdit::RemoteKey(v) => self.remote_key = v,
        }
    }
}

/// A single control change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEdit {
    SilentLogging(bool),
    ScanInterval(String),
    EntropyThreshold(String),
    EntropyMonitoring(bool),
    RemoteUrl(String),
    RemoteKey(String),
}

/// Parse the text of a numeric control.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidNumber`] naming `field`.
pub fn parse_number(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

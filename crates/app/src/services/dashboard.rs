//! Dashboard service: every use-case of the reader dashboard.
//!
//! [`DashboardClient`] is constructed explicitly and handed to whatever owns
//! the event wiring (console loop, polling scheduler, diagnostics). It owns
//! the UI state behind a mutex; the lock is only ever taken for a single
//! read or write and never held across an `.await`.
//!
//! Error tiers:
//! - silent: entropy polling
//! - logged only: connectivity check, settings load, fast-path toggles, log refresh
//! - user-visible: scan, write, save, reset, export, clear
//!
//! Nothing is retried.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pn2133_domain::error::{DashboardError, ValidationError};
use pn2133_domain::export::{EXPORT_MIME, ExportEnvelope};
use pn2133_domain::scan::ScanResult;
use pn2133_domain::settings::{LoggingMode, Settings, SettingsPatch};
use pn2133_domain::status::SystemStatus;
use pn2133_domain::tab::Tab;
use pn2133_domain::tag_log::LogsResponse;
use pn2133_domain::time::format_time_of_day;

use crate::ports::{Clock, DashboardView, DeviceApi, Downloader, UserPrompt};
use crate::render;
use crate::settings_form::{SettingsEdit, SettingsForm, parse_number};
use crate::shortcuts::Shortcut;

/// Process-wide UI state. Lives for the session and is reset on restart.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_tab: Tab,
    pub system_online: bool,
    /// Mirror of the device settings; `None` until the first successful
    /// fetch or save.
    pub settings_cache: Option<Settings>,
    pub form: SettingsForm,
    scan_in_flight: bool,
    write_in_flight: bool,
}

/// How a manual scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A tag was read and rendered.
    Tag(ScanResult),
    /// The device reported a failure; the message was rendered.
    Rejected(String),
    /// The request failed; the message was rendered.
    Failed(String),
    /// Another scan was already in flight; nothing happened.
    Busy,
}

/// How a write-to-tag request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Rejected(String),
    Failed(String),
    Busy,
}

#[derive(Debug, Clone, Copy)]
enum Control {
    Scan,
    Write,
}

/// Releases a disabled control on every exit path, including cancellation.
struct ControlGuard<'a, V: DashboardView> {
    state: &'a Mutex<UiState>,
    view: &'a V,
    control: Control,
}

impl<V: DashboardView> Drop for ControlGuard<'_, V> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match self.control {
            Control::Scan => {
                state.scan_in_flight = false;
                self.view.set_scan_busy(false);
            }
            Control::Write => {
                state.write_in_flight = false;
                self.view.set_write_busy(false);
            }
        }
    }
}

/// The dashboard controller.
pub struct DashboardClient<A, V, P, D, C> {
    api: A,
    view: V,
    prompt: P,
    downloader: D,
    clock: C,
    state: Mutex<UiState>,
}

impl<A, V, P, D, C> DashboardClient<A, V, P, D, C>
where
    A: DeviceApi,
    V: DashboardView,
    P: UserPrompt,
    D: Downloader,
    C: Clock,
{
    /// Create a client wired to the given ports.
    pub fn new(api: A, view: V, prompt: P, downloader: D, clock: C) -> Self {
        Self {
            api,
            view,
            prompt,
            downloader,
            clock,
            state: Mutex::new(UiState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, UiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The device API this client talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current UI state.
    pub fn snapshot(&self) -> UiState {
        self.state().clone()
    }

    pub fn active_tab(&self) -> Tab {
        self.state().active_tab
    }

    pub fn is_online(&self) -> bool {
        self.state().system_online
    }

    /// Cached mirror of the device settings.
    pub fn cached_settings(&self) -> Option<Settings> {
        self.state().settings_cache.clone()
    }

    /// Current values of the settings controls.
    pub fn settings_form(&self) -> SettingsForm {
        self.state().form.clone()
    }

    /// Initial page setup: scanner tab, connectivity check, settings, clock.
    ///
    /// Polling is started separately through
    /// [`PollingTasks`](crate::polling::PollingTasks).
    pub async fn start(&self) {
        self.switch_tab(Tab::Scanner).await;
        self.check_system_status().await;
        let _ = self.load_settings().await;
        self.tick_clock();
        tracing::info!("interface initialized, standing by");
    }

    /// Make `tab` the single active tab. Entering the data tab refreshes logs.
    #[tracing::instrument(skip(self))]
    pub async fn switch_tab(&self, tab: Tab) {
        self.view.activate_tab(tab);
        self.state().active_tab = tab;

        if tab == Tab::Data {
            let _ = self.refresh_logs().await;
        }
    }

    /// Probe the device once and record whether it is reachable.
    ///
    /// The online flag gates entropy polling only.
    pub async fn check_system_status(&self) -> SystemStatus {
        let status = match self.api.probe().await {
            Ok(()) => SystemStatus::Online,
            Err(err) => {
                tracing::error!(error = %err.user_message(), "system check failed");
                SystemStatus::Offline
            }
        };

        self.state().system_online = status.is_online();
        self.view.show_system_status(status);
        status
    }

    fn acquire(&self, control: Control) -> Option<ControlGuard<'_, V>> {
        {
            let mut state = self.state();
            let flag = match control {
                Control::Scan => &mut state.scan_in_flight,
                Control::Write => &mut state.write_in_flight,
            };
            if *flag {
                return None;
            }
            *flag = true;
        }

        match control {
            Control::Scan => self.view.set_scan_busy(true),
            Control::Write => self.view.set_write_busy(true),
        }

        Some(ControlGuard {
            state: &self.state,
            view: &self.view,
            control,
        })
    }

    /// Trigger one read and render its result.
    ///
    /// The scan control stays disabled while the request is in flight and is
    /// re-enabled on every outcome.
    #[tracing::instrument(skip(self))]
    pub async fn perform_scan(&self) -> ScanOutcome {
        let Some(_guard) = self.acquire(Control::Scan) else {
            tracing::debug!("scan already in flight, ignoring");
            return ScanOutcome::Busy;
        };

        self.view.show_scan_results(render::SCANNING_PLACEHOLDER);

        match self.api.scan().await {
            Ok(scan) if scan.success => {
                tracing::info!(uid = %scan.uid, tag_type = %scan.tag_type, "tag read");
                self.view
                    .show_scan_results(&render::scan_result(&scan, self.clock.offset()));
                ScanOutcome::Tag(scan)
            }
            Ok(scan) => {
                let message = scan.failure_message().to_string();
                tracing::info!(reason = %message, "scan rejected by device");
                self.view.show_scan_results(&render::scan_error(&message));
                ScanOutcome::Rejected(message)
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(error = %message, "scan request failed");
                self.view.show_scan_results(&render::scan_error(&message));
                ScanOutcome::Failed(message)
            }
        }
    }

    /// Write `data` to the tag in the field.
    ///
    /// The result is acknowledged through the prompt; the write input is
    /// cleared only on a confirmed success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyWriteData`] (after alerting the user)
    /// when `data` is blank. No request is issued in that case.
    #[tracing::instrument(skip(self, data), fields(len = data.len()))]
    pub async fn write_to_tag(&self, data: &str) -> Result<WriteOutcome, ValidationError> {
        let data = data.trim();
        if data.is_empty() {
            let err = ValidationError::EmptyWriteData;
            self.prompt.alert(&err.to_string());
            return Err(err);
        }

        let Some(_guard) = self.acquire(Control::Write) else {
            tracing::debug!("write already in flight, ignoring");
            return Ok(WriteOutcome::Busy);
        };

        let outcome = match self.api.write_tag(data).await {
            Ok(resp) if resp.success => {
                self.prompt.alert("write successful");
                self.view.clear_write_input();
                WriteOutcome::Written
            }
            Ok(resp) => {
                let message = resp.failure_message().to_string();
                self.prompt.alert(&format!("write failed: {message}"));
                WriteOutcome::Rejected(message)
            }
            Err(err) => {
                let message = err.user_message();
                self.prompt.alert(&format!("write error: {message}"));
                WriteOutcome::Failed(message)
            }
        };
        Ok(outcome)
    }

    /// Fast-path: flip silent logging on the device straight from the control.
    ///
    /// This bypasses the settings cache. A later full save built from a stale
    /// form can overwrite the change; that race is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns the request error after logging it. Nothing is shown to the user.
    pub async fn toggle_silent_logging(&self, enabled: bool) -> Result<(), DashboardError> {
        self.edit_settings(SettingsEdit::SilentLogging(enabled));

        match self
            .api
            .patch_settings(&SettingsPatch::silent_logging(enabled))
            .await
        {
            Ok(()) => {
                self.view
                    .show_logging_status(LoggingMode::from_enabled(enabled));
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err.user_message(), "failed to toggle logging");
                Err(err)
            }
        }
    }

    /// Fast-path: push a new scan interval straight from the control.
    ///
    /// Same caveat as [`toggle_silent_logging`](Self::toggle_silent_logging).
    ///
    /// # Errors
    ///
    /// Returns a validation error when `value` is not a non-negative integer
    /// (no request is issued), or the request error. Both are logged only.
    pub async fn update_scan_interval(&self, value: &str) -> Result<(), DashboardError> {
        self.edit_settings(SettingsEdit::ScanInterval(value.to_string()));

        let interval = parse_number("scan_interval", value).inspect_err(|err| {
            tracing::warn!(error = %err, "ignoring invalid scan interval");
        })?;

        self.api
            .patch_settings(&SettingsPatch::scan_interval(interval))
            .await
            .inspect_err(|err| {
                tracing::error!(error = %err.user_message(), "failed to update scan interval");
            })
    }

    /// Change one settings control without talking to the device.
    pub fn edit_settings(&self, edit: SettingsEdit) {
        let form = {
            let mut state = self.state();
            state.form.apply(edit);
            state.form.clone()
        };
        self.view.show_settings_form(&form);
    }

    /// Fetch the full settings object, push it into the controls and cache it.
    ///
    /// # Errors
    ///
    /// Returns the request error after logging it.
    pub async fn load_settings(&self) -> Result<Settings, DashboardError> {
        let settings = self.api.fetch_settings().await.inspect_err(|err| {
            tracing::error!(error = %err.user_message(), "failed to load settings");
        })?;

        let form = SettingsForm::from_settings(&settings);
        self.view.show_settings_form(&form);
        self.view
            .show_logging_status(LoggingMode::from_enabled(settings.silent_logging));

        {
            let mut state = self.state();
            state.form = form;
            state.settings_cache = Some(settings.clone());
        }
        Ok(settings)
    }

    /// Read every control into one object and push it wholesale.
    ///
    /// On success the cache is replaced and the user is told; on failure the
    /// user is alerted and the cache is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the validation or request error after alerting the user.
    #[tracing::instrument(skip(self))]
    pub async fn save_settings(&self) -> Result<Settings, DashboardError> {
        let form = self.settings_form();
        let settings = match form.to_settings() {
            Ok(settings) => settings,
            Err(err) => {
                let err = DashboardError::from(err);
                self.prompt
                    .alert(&format!("save error: {}", err.user_message()));
                return Err(err);
            }
        };

        match self.api.save_settings(&settings).await {
            Ok(()) => {
                self.state().settings_cache = Some(settings.clone());
                tracing::info!("settings saved");
                self.prompt.alert("settings saved");
                Ok(settings)
            }
            Err(err @ DashboardError::Status { .. }) => {
                self.prompt.alert("save failed");
                Err(err)
            }
            Err(err) => {
                self.prompt
                    .alert(&format!("save error: {}", err.user_message()));
                Err(err)
            }
        }
    }

    /// After confirmation, write the default settings into the controls and
    /// save them. Returns `Ok(None)` when the user declines.
    ///
    /// # Errors
    ///
    /// Propagates [`save_settings`](Self::save_settings) errors.
    pub async fn reset_settings(&self) -> Result<Option<Settings>, DashboardError> {
        if !self.prompt.confirm("reset all settings to defaults?").await {
            return Ok(None);
        }

        let form = SettingsForm::default();
        self.view.show_settings_form(&form);
        self.state().form = form;

        self.save_settings().await.map(Some)
    }

    /// One entropy tick. Returns whether a sample was rendered.
    ///
    /// Skipped while the device is offline; failures are swallowed.
    pub async fn refresh_entropy(&self) -> bool {
        if !self.is_online() {
            return false;
        }

        match self.api.entropy().await {
            Ok(sample) => {
                self.view.show_entropy(&sample);
                true
            }
            Err(_) => false,
        }
    }

    /// One log-poll tick. Only fetches while the data tab is active.
    /// Returns whether a refresh was attempted.
    pub async fn poll_logs(&self) -> bool {
        if self.active_tab() != Tab::Data {
            return false;
        }
        let _ = self.refresh_logs().await;
        true
    }

    /// Fetch the logs and render them newest-first.
    ///
    /// # Errors
    ///
    /// Returns the request error after logging it and flagging the panel.
    pub async fn refresh_logs(&self) -> Result<LogsResponse, DashboardError> {
        match self.api.logs().await {
            Ok(logs) => {
                self.view.show_log_count(&logs.count_label());
                self.view.show_log_status(logs.status_label());
                self.view
                    .show_logs(&render::logs(&logs, self.clock.offset()));
                Ok(logs)
            }
            Err(err) => {
                self.view.show_log_status("error loading logs");
                tracing::error!(error = %err.user_message(), "failed to refresh logs");
                Err(err)
            }
        }
    }

    /// Fetch the logs, wrap them in an export envelope and hand the JSON
    /// file to the download sink.
    ///
    /// # Errors
    ///
    /// Returns the request or download error after alerting the user.
    #[tracing::instrument(skip(self))]
    pub async fn export_logs(&self) -> Result<ExportEnvelope, DashboardError> {
        let result = self.build_and_download_export().await;
        match &result {
            Ok(envelope) => {
                tracing::info!(log_count = envelope.log_count, file = %envelope.file_name(), "logs exported");
            }
            Err(err) => {
                self.prompt
                    .alert(&format!("export failed: {}", err.user_message()));
            }
        }
        result
    }

    async fn build_and_download_export(&self) -> Result<ExportEnvelope, DashboardError> {
        let logs = self.api.logs().await?;
        let envelope = ExportEnvelope::new(logs.logs, self.clock.now());
        let body = envelope
            .to_json_pretty()
            .map_err(|err| DashboardError::Download(Box::new(err)))?;
        self.downloader
            .download(&envelope.file_name(), EXPORT_MIME, body.into_bytes())
            .await?;
        Ok(envelope)
    }

    /// After confirmation, delete every log entry and re-render the logs.
    /// Returns `Ok(false)` when the user declines.
    ///
    /// # Errors
    ///
    /// Returns the request error after alerting the user.
    #[tracing::instrument(skip(self))]
    pub async fn clear_logs(&self) -> Result<bool, DashboardError> {
        if !self
            .prompt
            .confirm("clear all log entries? this cannot be undone.")
            .await
        {
            return Ok(false);
        }

        match self.api.clear_logs().await {
            Ok(()) => {
                tracing::info!("logs cleared");
                let _ = self.refresh_logs().await;
                Ok(true)
            }
            Err(err @ DashboardError::Status { .. }) => {
                self.prompt.alert("clear failed");
                Err(err)
            }
            Err(err) => {
                self.prompt
                    .alert(&format!("clear error: {}", err.user_message()));
                Err(err)
            }
        }
    }

    /// One clock tick.
    pub fn tick_clock(&self) {
        let text = format_time_of_day(self.clock.now(), self.clock.offset());
        self.view.show_clock(&text);
    }

    /// Run the action bound to a keyboard shortcut. Returns whether the
    /// shortcut did anything.
    pub async fn handle_shortcut(&self, shortcut: Shortcut) -> bool {
        match shortcut {
            Shortcut::SwitchTab(tab) => {
                self.switch_tab(tab).await;
                true
            }
            Shortcut::Scan if self.active_tab() == Tab::Scanner => {
                self.perform_scan().await;
                true
            }
            Shortcut::Scan => false,
        }
    }
}

//! In-memory fakes for every port, shared by the unit tests of this crate.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::FixedOffset;
use tokio::sync::Notify;

use pn2133_domain::entropy::EntropySample;
use pn2133_domain::error::DashboardError;
use pn2133_domain::scan::{ScanResult, WriteResponse};
use pn2133_domain::settings::{LoggingMode, Settings, SettingsPatch};
use pn2133_domain::status::SystemStatus;
use pn2133_domain::tab::Tab;
use pn2133_domain::tag_log::{LogEntry, LogsResponse};
use pn2133_domain::time::{Timestamp, from_epoch_millis};

use crate::ports::{Clock, DashboardView, DeviceApi, Downloader, UserPrompt};
use crate::services::dashboard::DashboardClient;
use crate::settings_form::SettingsForm;

// ── Device ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe,
    FetchSettings,
    SaveSettings(Settings),
    Patch(SettingsPatch),
    Scan,
    Write(String),
    Entropy,
    Logs,
    Clear,
}

pub struct FakeDevice {
    /// When false every call fails with a network error.
    pub reachable: bool,
    /// When set, probe and every mutating call answer with this status.
    pub reject_with: Option<u16>,
    pub settings: Settings,
    pub scan: ScanResult,
    pub write: WriteResponse,
    pub entropy: EntropySample,
    pub logs: Vec<LogEntry>,
    scan_gate: Option<Arc<Notify>>,
    entropy_gate: Option<Arc<Notify>>,
    calls: Vec<Call>,
}

impl FakeDevice {
    fn reachable(&self) -> Result<(), DashboardError> {
        if self.reachable {
            Ok(())
        } else {
            Err(DashboardError::Network(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))))
        }
    }

    fn accepted(&self) -> Result<(), DashboardError> {
        self.reachable()?;
        match self.reject_with {
            Some(status) => Err(DashboardError::Status { status }),
            None => Ok(()),
        }
    }
}

pub struct FakeApi {
    inner: Mutex<FakeDevice>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            inner: Mutex::new(FakeDevice {
                reachable: true,
                reject_with: None,
                settings: Settings::default(),
                scan: ScanResult::tag("04 A2 3B 1C", "MIFARE", fixed_now()),
                write: WriteResponse {
                    success: true,
                    error: None,
                },
                entropy: EntropySample {
                    current: 4.2,
                    baseline: 4.0,
                    deviation: 0.2,
                    paranormal_active: false,
                },
                logs: Vec::new(),
                scan_gate: None,
                entropy_gate: None,
                calls: Vec::new(),
            }),
        }
    }
}

impl FakeApi {
    pub fn device(&self) -> MutexGuard<'_, FakeDevice> {
        self.inner.lock().unwrap()
    }

    /// Hold every scan until the returned gate is notified.
    pub fn gate_scans(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.device().scan_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Hold every entropy request until the returned gate is notified.
    pub fn gate_entropy(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.device().entropy_gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.device().calls.clone()
    }

    pub fn has(&self, call: &Call) -> bool {
        self.device().calls.contains(call)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.device().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) -> MutexGuard<'_, FakeDevice> {
        let mut device = self.device();
        device.calls.push(call);
        device
    }
}

impl DeviceApi for FakeApi {
    async fn probe(&self) -> Result<(), DashboardError> {
        self.record(Call::Probe).accepted()
    }

    async fn fetch_settings(&self) -> Result<Settings, DashboardError> {
        let device = self.record(Call::FetchSettings);
        device.reachable()?;
        Ok(device.settings.clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), DashboardError> {
        let mut device = self.record(Call::SaveSettings(settings.clone()));
        device.accepted()?;
        device.settings = settings.clone();
        Ok(())
    }

    async fn patch_settings(&self, patch: &SettingsPatch) -> Result<(), DashboardError> {
        let mut device = self.record(Call::Patch(patch.clone()));
        device.accepted()?;
        if let Some(enabled) = patch.silent_logging {
            device.settings.silent_logging = enabled;
        }
        if let Some(interval) = patch.scan_interval {
            device.settings.scan_interval = interval;
        }
        Ok(())
    }

    async fn scan(&self) -> Result<ScanResult, DashboardError> {
        let gate = self.record(Call::Scan).scan_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let device = self.device();
        device.reachable()?;
        Ok(device.scan.clone())
    }

    async fn write_tag(&self, data: &str) -> Result<WriteResponse, DashboardError> {
        let device = self.record(Call::Write(data.to_string()));
        device.reachable()?;
        Ok(device.write.clone())
    }

    async fn entropy(&self) -> Result<EntropySample, DashboardError> {
        let gate = self.record(Call::Entropy).entropy_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let device = self.device();
        device.reachable()?;
        Ok(device.entropy.clone())
    }

    async fn logs(&self) -> Result<LogsResponse, DashboardError> {
        let device = self.record(Call::Logs);
        device.reachable()?;
        Ok(LogsResponse {
            count: device.logs.len(),
            silent_logging: device.settings.silent_logging,
            logs: device.logs.clone(),
        })
    }

    async fn clear_logs(&self) -> Result<(), DashboardError> {
        let mut device = self.record(Call::Clear);
        device.accepted()?;
        device.logs.clear();
        Ok(())
    }
}

// ── View ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Status(SystemStatus),
    Tab(Tab),
    ScanBusy(bool),
    ScanResults(String),
    WriteBusy(bool),
    ClearWriteInput,
    Entropy(EntropySample),
    LoggingStatus(LoggingMode),
    LogCount(String),
    LogStatus(String),
    Logs(String),
    SettingsForm(SettingsForm),
    Clock(String),
}

#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    fn push(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has(&self, call: &ViewCall) -> bool {
        self.calls.lock().unwrap().contains(call)
    }

    pub fn active_tabs(&self) -> Vec<Tab> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Tab(tab) => Some(tab),
                _ => None,
            })
            .collect()
    }

    pub fn scan_busy_transitions(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::ScanBusy(busy) => Some(busy),
                _ => None,
            })
            .collect()
    }

    pub fn write_busy_transitions(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::WriteBusy(busy) => Some(busy),
                _ => None,
            })
            .collect()
    }

    pub fn scan_results(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::ScanResults(html) => Some(html),
                _ => None,
            })
            .collect()
    }

    pub fn last_scan_results(&self) -> Option<String> {
        self.scan_results().pop()
    }

    pub fn last_logs(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|c| match c {
            ViewCall::Logs(html) => Some(html),
            _ => None,
        })
    }
}

impl DashboardView for RecordingView {
    fn show_system_status(&self, status: SystemStatus) {
        self.push(ViewCall::Status(status));
    }

    fn activate_tab(&self, tab: Tab) {
        self.push(ViewCall::Tab(tab));
    }

    fn set_scan_busy(&self, busy: bool) {
        self.push(ViewCall::ScanBusy(busy));
    }

    fn show_scan_results(&self, html: &str) {
        self.push(ViewCall::ScanResults(html.to_string()));
    }

    fn set_write_busy(&self, busy: bool) {
        self.push(ViewCall::WriteBusy(busy));
    }

    fn clear_write_input(&self) {
        self.push(ViewCall::ClearWriteInput);
    }

    fn show_entropy(&self, sample: &EntropySample) {
        self.push(ViewCall::Entropy(sample.clone()));
    }

    fn show_logging_status(&self, mode: LoggingMode) {
        self.push(ViewCall::LoggingStatus(mode));
    }

    fn show_log_count(&self, text: &str) {
        self.push(ViewCall::LogCount(text.to_string()));
    }

    fn show_log_status(&self, text: &str) {
        self.push(ViewCall::LogStatus(text.to_string()));
    }

    fn show_logs(&self, html: &str) {
        self.push(ViewCall::Logs(html.to_string()));
    }

    fn show_settings_form(&self, form: &SettingsForm) {
        self.push(ViewCall::SettingsForm(form.clone()));
    }

    fn show_clock(&self, text: &str) {
        self.push(ViewCall::Clock(text.to_string()));
    }
}

// ── Prompt ─────────────────────────────────────────────────────────

pub struct ScriptedPrompt {
    answer: Mutex<bool>,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl Default for ScriptedPrompt {
    fn default() -> Self {
        Self {
            answer: Mutex::new(true),
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedPrompt {
    pub fn answer(&self, yes: bool) {
        *self.answer.lock().unwrap() = yes;
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        *self.answer.lock().unwrap()
    }
}

// ── Download ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryDownloader {
    fail: Mutex<bool>,
    files: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MemoryDownloader {
    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn files(&self) -> Vec<(String, String, Vec<u8>)> {
        self.files.lock().unwrap().clone()
    }
}

impl Downloader for MemoryDownloader {
    async fn download(
        &self,
        file_name: &str,
        mime: &str,
        contents: Vec<u8>,
    ) -> Result<(), DashboardError> {
        if *self.fail.lock().unwrap() {
            return Err(DashboardError::Download(Box::new(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only directory",
            ))));
        }
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), mime.to_string(), contents));
        Ok(())
    }
}

// ── Clock ──────────────────────────────────────────────────────────

/// 2024-03-01 13:05:09 UTC.
pub fn fixed_now() -> Timestamp {
    from_epoch_millis(1_709_298_309_000).unwrap()
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        fixed_now()
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }
}

// ── Harness ────────────────────────────────────────────────────────

pub type TestClient = DashboardClient<
    Arc<FakeApi>,
    Arc<RecordingView>,
    Arc<ScriptedPrompt>,
    Arc<MemoryDownloader>,
    FixedClock,
>;

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub view: Arc<RecordingView>,
    pub prompt: Arc<ScriptedPrompt>,
    pub downloads: Arc<MemoryDownloader>,
    pub client: Arc<TestClient>,
}

impl Harness {
    pub fn new() -> Self {
        let api = Arc::new(FakeApi::default());
        let view = Arc::new(RecordingView::default());
        let prompt = Arc::new(ScriptedPrompt::default());
        let downloads = Arc::new(MemoryDownloader::default());
        let client = Arc::new(DashboardClient::new(
            Arc::clone(&api),
            Arc::clone(&view),
            Arc::clone(&prompt),
            Arc::clone(&downloads),
            FixedClock,
        ));
        Self {
            api,
            view,
            prompt,
            downloads,
            client,
        }
    }
}

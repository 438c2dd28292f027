//! In-memory dashboard document.
//!
//! Holds one [`Element`] per id of the dashboard markup and implements the
//! [`DashboardView`] port by mutating them exactly as the page would.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use pn2133_app::ports::DashboardView;
use pn2133_app::render::EMPTY_LOGS_PLACEHOLDER;
use pn2133_app::settings_form::SettingsForm;
use pn2133_domain::entropy::EntropySample;
use pn2133_domain::settings::LoggingMode;
use pn2133_domain::status::SystemStatus;
use pn2133_domain::tab::Tab;

use crate::markup::text_content;

/// Element ids of the dashboard markup.
pub mod ids {
    pub const SYSTEM_STATUS: &str = "systemStatus";
    pub const CONNECTION_INFO: &str = "connectionInfo";
    pub const SYSTEM_TIME: &str = "systemTime";
    pub const SCAN_BUTTON: &str = "scanButton";
    pub const SCAN_RESULTS: &str = "scanResults";
    pub const WRITE_BUTTON: &str = "writeButton";
    pub const WRITE_DATA: &str = "writeData";
    pub const SILENT_LOGGING: &str = "silentLogging";
    pub const LOGGING_STATUS: &str = "loggingStatus";
    pub const SCAN_INTERVAL: &str = "scanInterval";
    pub const ENTROPY_THRESHOLD: &str = "entropyThreshold";
    pub const ENTROPY_MONITORING: &str = "entropyMonitoring";
    pub const REMOTE_URL: &str = "supabaseUrl";
    pub const REMOTE_KEY: &str = "supabaseKey";
    pub const ENTROPY_CURRENT: &str = "entropyCurrent";
    pub const ENTROPY_BASELINE: &str = "entropyBaseline";
    pub const ENTROPY_DEVIATION: &str = "entropyDeviation";
    pub const ENTROPY_STATUS: &str = "entropyStatus";
    pub const LOG_COUNT: &str = "logCount";
    pub const LOG_STATUS: &str = "logStatus";
    pub const LOGS_DISPLAY: &str = "logsDisplay";
}

const SCAN_LABEL: &str = "SCAN FOR TAG";
const SCAN_BUSY_LABEL: &str = "SCANNING...";
const WRITE_LABEL: &str = "WRITE TO TAG";
const WRITE_BUSY_LABEL: &str = "WRITING...";
const ACTIVE: &str = "active";

/// Key of the tab button carrying `data-tab="{tab}"`.
#[must_use]
pub fn tab_button_key(tab: Tab) -> String {
    format!("tab-button:{tab}")
}

/// State of one element: class list, inner HTML, and form-control state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub class: String,
    pub html: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
}

impl Element {
    fn with_class(class: &str) -> Self {
        Self {
            class: class.to_string(),
            ..Self::default()
        }
    }

    fn with_html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            if !self.class.is_empty() {
                self.class.push(' ');
            }
            self.class.push_str(class);
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.class = self
            .class
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
    }
}

/// The whole dashboard page, minus the browser.
pub struct Document {
    elements: Mutex<BTreeMap<String, Element>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A freshly loaded page: every element present, nothing fetched yet.
    #[must_use]
    pub fn new() -> Self {
        let form = SettingsForm::default();
        let mut elements = BTreeMap::new();
        let mut put = |id: &str, element: Element| {
            elements.insert(id.to_string(), element);
        };

        put(
            ids::SYSTEM_STATUS,
            Element::with_class("status-indicator").with_html("CONNECTING..."),
        );
        put(ids::CONNECTION_INFO, Element::default());
        put(ids::SYSTEM_TIME, Element::default().with_html("--:--:--"));
        put(ids::SCAN_BUTTON, Element::with_class("btn").with_html(SCAN_LABEL));
        put(ids::SCAN_RESULTS, Element::default());
        put(ids::WRITE_BUTTON, Element::with_class("btn").with_html(WRITE_LABEL));
        put(ids::WRITE_DATA, Element::default());
        put(ids::SILENT_LOGGING, Element::default());
        put(
            ids::LOGGING_STATUS,
            Element::with_class(LoggingMode::Disabled.css_class())
                .with_html(LoggingMode::Disabled.label()),
        );
        put(ids::SCAN_INTERVAL, Element::default());
        put(ids::ENTROPY_THRESHOLD, Element::default());
        put(ids::ENTROPY_MONITORING, Element::default());
        put(ids::REMOTE_URL, Element::default());
        put(ids::REMOTE_KEY, Element::default());
        for id in [
            ids::ENTROPY_CURRENT,
            ids::ENTROPY_BASELINE,
            ids::ENTROPY_DEVIATION,
        ] {
            put(id, Element::default().with_html("--"));
        }
        put(
            ids::ENTROPY_STATUS,
            Element::with_class("entropy-status").with_html("NORMAL"),
        );
        put(ids::LOG_COUNT, Element::default().with_html("0 entries"));
        put(ids::LOG_STATUS, Element::default());
        put(
            ids::LOGS_DISPLAY,
            Element::default().with_html(EMPTY_LOGS_PLACEHOLDER),
        );
        for tab in Tab::ALL {
            put(tab.id(), Element::with_class("tab-panel"));
            put(&tab_button_key(tab), Element::with_class("tab-button"));
        }

        let document = Self {
            elements: Mutex::new(elements),
        };
        document.show_settings_form(&form);
        document
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Element>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut Element)) {
        let mut elements = self.lock();
        match elements.get_mut(id) {
            Some(element) => f(element),
            None => tracing::warn!(id, "element missing from document"),
        }
    }

    /// Copy of one element.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<Element> {
        self.lock().get(id).cloned()
    }

    /// Rendered text of an element, tags stripped.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.lock().get(id).map(|e| text_content(&e.html))
    }

    /// Value of a text control, or an empty string.
    #[must_use]
    pub fn value(&self, id: &str) -> String {
        self.lock().get(id).map(|e| e.value.clone()).unwrap_or_default()
    }

    /// Type into a text control.
    pub fn set_value(&self, id: &str, value: &str) {
        self.update(id, |e| e.value = value.to_string());
    }

    #[must_use]
    pub fn is_checked(&self, id: &str) -> bool {
        self.lock().get(id).is_some_and(|e| e.checked)
    }

    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.lock().get(id).is_some_and(|e| e.disabled)
    }

    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.lock().get(id).is_some_and(|e| e.has_class(class))
    }

    /// Tabs whose panel carries the active marker.
    #[must_use]
    pub fn active_tabs(&self) -> Vec<Tab> {
        let elements = self.lock();
        Tab::ALL
            .into_iter()
            .filter(|tab| elements.get(tab.id()).is_some_and(|e| e.has_class(ACTIVE)))
            .collect()
    }

    /// Plain-text rendering of the header and the active panel.
    #[must_use]
    pub fn render_text(&self) -> String {
        let text = |id: &str| self.text(id).unwrap_or_default();
        let tabs = Tab::ALL
            .into_iter()
            .map(|tab| {
                if self.has_class(tab.id(), ACTIVE) {
                    format!("[{tab}]")
                } else {
                    tab.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut lines = vec![
            format!(
                "PN2133 {} ({}) {}",
                text(ids::SYSTEM_STATUS),
                text(ids::CONNECTION_INFO),
                text(ids::SYSTEM_TIME)
            ),
            tabs,
            String::new(),
        ];

        match self.active_tabs().first() {
            Some(Tab::Scanner) => {
                lines.push(format!("[{}]", text(ids::SCAN_BUTTON)));
                lines.push(text(ids::SCAN_RESULTS));
                lines.push(format!(
                    "write: {:?} [{}]",
                    self.value(ids::WRITE_DATA),
                    text(ids::WRITE_BUTTON)
                ));
            }
            Some(Tab::Logger) => {
                lines.push(format!(
                    "silent logging: {}",
                    text(ids::LOGGING_STATUS)
                ));
                lines.push(format!(
                    "scan interval: {} ms",
                    self.value(ids::SCAN_INTERVAL)
                ));
                lines.push(format!(
                    "entropy: current {} baseline {} deviation {} [{}]",
                    text(ids::ENTROPY_CURRENT),
                    text(ids::ENTROPY_BASELINE),
                    text(ids::ENTROPY_DEVIATION),
                    text(ids::ENTROPY_STATUS)
                ));
            }
            Some(Tab::Settings) => {
                lines.push(format!(
                    "silent_logging = {}",
                    self.is_checked(ids::SILENT_LOGGING)
                ));
                lines.push(format!(
                    "scan_interval = {}",
                    self.value(ids::SCAN_INTERVAL)
                ));
                lines.push(format!(
                    "entropy_threshold = {}",
                    self.value(ids::ENTROPY_THRESHOLD)
                ));
                lines.push(format!(
                    "entropy_monitoring = {}",
                    self.is_checked(ids::ENTROPY_MONITORING)
                ));
                lines.push(format!("remote_url = {}", self.value(ids::REMOTE_URL)));
                lines.push(format!("remote_key = {}", self.value(ids::REMOTE_KEY)));
            }
            Some(Tab::Data) => {
                lines.push(format!(
                    "{} ({})",
                    text(ids::LOG_COUNT),
                    text(ids::LOG_STATUS)
                ));
                lines.push(text(ids::LOGS_DISPLAY));
            }
            None => {}
        }

        lines.join("\n")
    }
}

impl DashboardView for Document {
    fn show_system_status(&self, status: SystemStatus) {
        self.update(ids::SYSTEM_STATUS, |e| {
            e.html = status.label().to_string();
            e.class = status.css_class().to_string();
        });
        self.update(ids::CONNECTION_INFO, |e| e.html = status.info().to_string());
    }

    fn activate_tab(&self, tab: Tab) {
        let mut elements = self.lock();
        for other in Tab::ALL {
            for key in [other.id().to_string(), tab_button_key(other)] {
                if let Some(element) = elements.get_mut(&key) {
                    element.remove_class(ACTIVE);
                }
            }
        }
        for key in [tab.id().to_string(), tab_button_key(tab)] {
            if let Some(element) = elements.get_mut(&key) {
                element.add_class(ACTIVE);
            }
        }
    }

    fn set_scan_busy(&self, busy: bool) {
        self.update(ids::SCAN_BUTTON, |e| {
            e.disabled = busy;
            e.html = if busy { SCAN_BUSY_LABEL } else { SCAN_LABEL }.to_string();
        });
    }

    fn show_scan_results(&self, html: &str) {
        self.update(ids::SCAN_RESULTS, |e| e.html = html.to_string());
    }

    fn set_write_busy(&self, busy: bool) {
        self.update(ids::WRITE_BUTTON, |e| {
            e.disabled = busy;
            e.html = if busy { WRITE_BUSY_LABEL } else { WRITE_LABEL }.to_string();
        });
    }

    fn clear_write_input(&self) {
        self.update(ids::WRITE_DATA, |e| e.value.clear());
    }

    fn show_entropy(&self, sample: &EntropySample) {
        self.update(ids::ENTROPY_CURRENT, |e| e.html = sample.current.to_string());
        self.update(ids::ENTROPY_BASELINE, |e| e.html = sample.baseline.to_string());
        self.update(ids::ENTROPY_DEVIATION, |e| {
            e.html = sample.deviation.to_string();
        });
        let status = sample.status();
        self.update(ids::ENTROPY_STATUS, |e| {
            e.html = status.label().to_string();
            e.class = status.css_class().to_string();
        });
    }

    fn show_logging_status(&self, mode: LoggingMode) {
        self.update(ids::LOGGING_STATUS, |e| {
            e.html = mode.label().to_string();
            e.class = mode.css_class().to_string();
        });
    }

    fn show_log_count(&self, text: &str) {
        self.update(ids::LOG_COUNT, |e| e.html = text.to_string());
    }

    fn show_log_status(&self, text: &str) {
        self.update(ids::LOG_STATUS, |e| e.html = text.to_string());
    }

    fn show_logs(&self, html: &str) {
        self.update(ids::LOGS_DISPLAY, |e| e.html = html.to_string());
    }

    fn show_settings_form(&self, form: &SettingsForm) {
        self.update(ids::SILENT_LOGGING, |e| e.checked = form.silent_logging);
        self.update(ids::SCAN_INTERVAL, |e| e.value.clone_from(&form.scan_interval));
        self.update(ids::ENTROPY_THRESHOLD, |e| {
            e.value.clone_from(&form.entropy_threshold);
        });
        self.update(ids::ENTROPY_MONITORING, |e| {
            e.checked = form.entropy_monitoring;
        });
        self.update(ids::REMOTE_URL, |e| e.value.clone_from(&form.remote_url));
        self.update(ids::REMOTE_KEY, |e| e.value.clone_from(&form.remote_key));
    }

    fn show_clock(&self, text: &str) {
        self.update(ids::SYSTEM_TIME, |e| e.html = text.to_string());
    }
}

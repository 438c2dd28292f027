//! View port: the render target.
//!
//! Each method maps onto a fixed set of elements of the dashboard markup
//! (status header, tab bar, scanner panel, logger panel, settings form,
//! data panel, clock). Mutations are synchronous and infallible: a missing
//! element is the markup's problem, not the client's.

use std::sync::Arc;

use pn2133_domain::entropy::EntropySample;
use pn2133_domain::settings::LoggingMode;
use pn2133_domain::status::SystemStatus;
use pn2133_domain::tab::Tab;

use crate::settings_form::SettingsForm;

/// Render target driven by the dashboard client.
pub trait DashboardView: Send + Sync {
    /// Update the connectivity indicator and its info line.
    fn show_system_status(&self, status: SystemStatus);

    /// Clear every active tab marker, then mark `tab` (button and panel) active.
    fn activate_tab(&self, tab: Tab);

    /// Disable/enable the scan control and swap its label.
    fn set_scan_busy(&self, busy: bool);

    /// Replace the scan results panel with an HTML fragment.
    fn show_scan_results(&self, html: &str);

    /// Disable/enable the write control and swap its label.
    fn set_write_busy(&self, busy: bool);

    /// Empty the write input.
    fn clear_write_input(&self);

    /// Render the four entropy fields and the derived status.
    fn show_entropy(&self, sample: &EntropySample);

    /// Update the silent-logging indicator.
    fn show_logging_status(&self, mode: LoggingMode);

    /// Update the log entry counter text.
    fn show_log_count(&self, text: &str);

    /// Update the logging-mode line of the data panel.
    fn show_log_status(&self, text: &str);

    /// Replace the logs panel with an HTML fragment.
    fn show_logs(&self, html: &str);

    /// Push every settings control value from the form model.
    fn show_settings_form(&self, form: &SettingsForm);

    /// Update the header clock.
    fn show_clock(&self, text: &str);
}

impl<T: DashboardView> DashboardView for Arc<T> {
    fn show_system_status(&self, status: SystemStatus) {
        (**self).show_system_status(status);
    }

    fn activate_tab(&self, tab: Tab) {
        (**self).activate_tab(tab);
    }

    fn set_scan_busy(&self, busy: bool) {
        (**self).set_scan_busy(busy);
    }

    fn show_scan_results(&self, html: &str) {
        (**self).show_scan_results(html);
    }

    fn set_write_busy(&self, busy: bool) {
        (**self).set_write_busy(busy);
    }

    fn clear_write_input(&self) {
        (**self).clear_write_input();
    }

    fn show_entropy(&self, sample: &EntropySample) {
        (**self).show_entropy(sample);
    }

    fn show_logging_status(&self, mode: LoggingMode) {
        (**self).show_logging_status(mode);
    }

    fn show_log_count(&self, text: &str) {
        (**self).show_log_count(text);
    }

    fn show_log_status(&self, text: &str) {
        (**self).show_log_status(text);
    }

    fn show_logs(&self, html: &str) {
        (**self).show_logs(html);
    }

    fn show_settings_form(&self, form: &SettingsForm) {
        (**self).show_settings_form(form);
    }

    fn show_clock(&self, text: &str) {
        (**self).show_clock(text);
    }
}

//! HTML fragment rendering for the scan and logs panels.
//!
//! Fragments are askama templates; device-provided text is escaped by the
//! template engine.

use askama::Template;
use chrono::FixedOffset;

use pn2133_domain::scan::ScanResult;
use pn2133_domain::tag_log::LogsResponse;
use pn2133_domain::time::{Timestamp, format_date_time, format_time_of_day};

/// Shown in the scan panel while a scan is in flight.
pub const SCANNING_PLACEHOLDER: &str =
    r#"<div class="placeholder-text">[ SCANNING FOR TAG... ]<br>Keep tag near reader</div>"#;

/// Shown in the logs panel when the device has no entries.
pub const EMPTY_LOGS_PLACEHOLDER: &str =
    r#"<div class="placeholder-text">[ No log entries available ]</div>"#;

/// Shown instead of a time the device did not provide.
const MISSING_TIME: &str = "\u{2014}";

fn display_time(ts: Option<Timestamp>, format: impl Fn(Timestamp) -> String) -> String {
    ts.map_or_else(|| MISSING_TIME.to_string(), format)
}

/// Card for a successful read.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="log-entry"><div class="log-uid">{{ uid }}</div><div class="log-meta">Type: {{ tag_type }} | Time: {{ time }}</div>{% if let Some(ndef) = ndef %}<div class="log-data">NDEF: {{ ndef }}</div>{% endif %}</div>"#
)]
pub struct ScanCardTemplate<'a> {
    uid: &'a str,
    tag_type: &'a str,
    time: String,
    ndef: Option<&'a str>,
}

/// Failure panel for a scan.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="placeholder-text text-warning">[ SCAN FAILED ]<br>{{ message }}</div>"#
)]
pub struct ScanErrorTemplate<'a> {
    message: &'a str,
}

struct LogRow<'a> {
    uid: &'a str,
    tag_type: &'a str,
    time: String,
    data: Option<&'a str>,
}

/// Log cards, newest first.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for row in rows %}<div class="log-entry"><div class="log-uid">{{ row.uid }}</div><div class="log-meta">Type: {{ row.tag_type }} | Time: {{ row.time }}</div>{% if let Some(data) = row.data %}<div class="log-data">Data: {{ data }}</div>{% endif %}</div>{% endfor %}"#
)]
pub struct LogsTemplate<'a> {
    rows: Vec<LogRow<'a>>,
}

/// Card for a successful read: uid, type, time, optional NDEF payload.
#[must_use]
pub fn scan_result(scan: &ScanResult, offset: FixedOffset) -> String {
    ScanCardTemplate {
        uid: &scan.uid,
        tag_type: &scan.tag_type,
        time: display_time(scan.timestamp, |ts| format_time_of_day(ts, offset)),
        ndef: scan.ndef(),
    }
    .to_string()
}

/// Failure panel with the device-supplied or network-error message.
#[must_use]
pub fn scan_error(message: &str) -> String {
    ScanErrorTemplate { message }.to_string()
}

/// Logs panel: placeholder when empty, otherwise newest-first cards.
#[must_use]
pub fn logs(logs: &LogsResponse, offset: FixedOffset) -> String {
    if logs.logs.is_empty() {
        return EMPTY_LOGS_PLACEHOLDER.to_string();
    }

    LogsTemplate {
        rows: logs
            .newest_first()
            .map(|entry| LogRow {
                uid: &entry.uid,
                tag_type: &entry.tag_type,
                time: display_time(entry.timestamp, |ts| format_date_time(ts, offset)),
                data: entry.payload(),
            })
            .collect(),
    }
    .to_string()
}

//! Export envelope wrapped around downloaded logs.
//!
//! The export is a pure client-side transform: the current logs are fetched,
//! wrapped, serialized and handed to a download sink.

use serde::{Serialize, Serializer};

use crate::tag_log::LogEntry;
use crate::time::{Timestamp, format_iso8601};

/// Device identifier written into every export.
pub const DEVICE_ID: &str = "PN2133";

/// MIME type of the export file.
pub const EXPORT_MIME: &str = "application/json";

/// Downloadable snapshot of the tag logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEnvelope {
    #[serde(serialize_with = "serialize_iso8601")]
    pub exported_at: Timestamp,
    pub device_id: &'static str,
    pub log_count: usize,
    pub logs: Vec<LogEntry>,
}

impl ExportEnvelope {
    /// Wrap `logs` (in device order) exported at `now`.
    ///
    /// `log_count` always equals `logs.len()`.
    #[must_use]
    pub fn new(logs: Vec<LogEntry>, now: Timestamp) -> Self {
        Self {
            exported_at: now,
            device_id: DEVICE_ID,
            log_count: logs.len(),
            logs,
        }
    }

    /// Timestamped download file name (`pn2133_logs_<epoch-ms>.json`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("pn2133_logs_{}.json", self.exported_at.timestamp_millis())
    }

    /// Pretty-printed JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; cannot happen for well-formed entries.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_iso8601<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso8601(*ts))
}

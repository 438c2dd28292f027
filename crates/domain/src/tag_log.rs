//! Tag logs: the device-side history of reads.
//!
//! The device returns entries oldest-first. The collection is immutable
//! from the client's point of view except through an explicit clear.

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, epoch_millis};

/// A single recorded read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub uid: String,
    pub tag_type: String,
    /// `None` when the device sent no usable time for this entry.
    #[serde(default, with = "epoch_millis::lenient")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl LogEntry {
    #[must_use]
    pub fn new(uid: impl Into<String>, tag_type: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            uid: uid.into(),
            tag_type: tag_type.into(),
            timestamp: Some(timestamp),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// The payload, if present and non-empty.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }
}

/// Response of `GET /api/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub silent_logging: bool,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl LogsResponse {
    /// Entries in display order (newest first).
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter().rev()
    }

    /// Summary text for the entry counter (`"3 entries"`).
    #[must_use]
    pub fn count_label(&self) -> String {
        format!("{} entries", self.count)
    }

    /// Summary text for the logging-mode line.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.silent_logging {
            "logging active"
        } else {
            "manual only"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_iterate_newest_first() {
        let logs: LogsResponse = serde_json::from_str(
            r#"{"count":2,"silent_logging":true,"logs":[
                {"uid":"A1","tag_type":"MIFARE","timestamp":1000},
                {"uid":"B2","tag_type":"NTAG","timestamp":2000}]}"#,
        )
        .unwrap();
        let order: Vec<&str> = logs.newest_first().map(|e| e.uid.as_str()).collect();
        assert_eq!(order, vec!["B2", "A1"]);
    }

    #[test]
    fn should_keep_valid_entries_when_one_timestamp_is_unusable() {
        let logs: LogsResponse = serde_json::from_str(
            r#"{"count":3,"silent_logging":false,"logs":[
                {"uid":"A1","tag_type":"MIFARE","timestamp":1000},
                {"uid":"B2","tag_type":"NTAG"},
                {"uid":"C3","tag_type":"NTAG","timestamp":"later"}]}"#,
        )
        .unwrap();
        assert_eq!(logs.logs.len(), 3);
        assert_eq!(logs.logs[0].timestamp.unwrap().timestamp_millis(), 1000);
        assert!(logs.logs[1].timestamp.is_none());
        assert!(logs.logs[2].timestamp.is_none());
    }

    #[test]
    fn should_leave_server_order_untouched() {
        let logs = LogsResponse {
            count: 2,
            silent_logging: false,
            logs: vec![
                LogEntry::new("A1", "MIFARE", crate::time::from_epoch_millis(1).unwrap()),
                LogEntry::new("B2", "NTAG", crate::time::from_epoch_millis(2).unwrap()),
            ],
        };
        let _ = logs.newest_first().count();
        assert_eq!(logs.logs[0].uid, "A1");
    }

    #[test]
    fn should_format_summary_labels() {
        let logs = LogsResponse {
            count: 3,
            silent_logging: false,
            logs: Vec::new(),
        };
        assert_eq!(logs.count_label(), "3 entries");
        assert_eq!(logs.status_label(), "manual only");
    }

    #[test]
    fn should_treat_missing_logs_array_as_empty() {
        let logs: LogsResponse = serde_json::from_str(r#"{"count":0}"#).unwrap();
        assert!(logs.logs.is_empty());
    }

    #[test]
    fn should_ignore_empty_payload() {
        let entry = LogEntry::new("A1", "MIFARE", crate::time::now()).with_data("");
        assert!(entry.payload().is_none());
    }
}

//! Scans and writes: one request/response cycle against the reader.

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, epoch_millis};

/// Result of a single read attempt, as returned by `GET /api/scan`.
///
/// A business failure carries `success: false` and usually an `error`;
/// the tag fields are then empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub success: bool,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub tag_type: String,
    #[serde(default, with = "epoch_millis::option")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndef_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// Successful read of a tag.
    #[must_use]
    pub fn tag(uid: impl Into<String>, tag_type: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            success: true,
            uid: uid.into(),
            tag_type: tag_type.into(),
            timestamp: Some(timestamp),
            ndef_data: None,
            error: None,
        }
    }

    /// Failed read with a device-supplied reason.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            uid: String::new(),
            tag_type: String::new(),
            timestamp: None,
            ndef_data: None,
            error: Some(error.into()),
        }
    }

    /// Attach an NDEF payload.
    #[must_use]
    pub fn with_ndef(mut self, ndef: impl Into<String>) -> Self {
        self.ndef_data = Some(ndef.into());
        self
    }

    /// The reason shown to the user when `success` is false.
    #[must_use]
    pub fn failure_message(&self) -> &str {
        self.error
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("unknown error")
    }

    /// The NDEF payload, if present and non-empty.
    #[must_use]
    pub fn ndef(&self) -> Option<&str> {
        self.ndef_data.as_deref().filter(|d| !d.is_empty())
    }
}

/// Body of `POST /api/write`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub data: String,
}

/// Response of `POST /api/write`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteResponse {
    /// The reason shown to the user when `success` is false.
    #[must_use]
    pub fn failure_message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

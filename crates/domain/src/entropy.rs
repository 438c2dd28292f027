//! Entropy samples: a background anomaly indicator polled independently
//! of tag traffic.

use serde::{Deserialize, Serialize};

/// One reading of `GET /api/entropy`. Never stored beyond the current render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropySample {
    pub current: f64,
    pub baseline: f64,
    pub deviation: f64,
    pub paranormal_active: bool,
}

impl EntropySample {
    #[must_use]
    pub fn status(&self) -> EntropyStatus {
        if self.paranormal_active {
            EntropyStatus::Anomaly
        } else {
            EntropyStatus::Normal
        }
    }
}

/// Binary status derived from a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyStatus {
    Normal,
    Anomaly,
}

impl EntropyStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Anomaly => "ANOMALY",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "entropy-status",
            Self::Anomaly => "entropy-status anomaly",
        }
    }
}

//! Tab navigation states.
//!
//! Exactly one tab is active at a time; any tab is reachable from any other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Scanner,
    Logger,
    Settings,
    Data,
}

impl Tab {
    /// Every tab, in navigation order.
    pub const ALL: [Tab; 4] = [Tab::Scanner, Tab::Logger, Tab::Settings, Tab::Data];

    /// Stable identifier shared with the markup (`scanner`, `logger`, …).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Scanner => "scanner",
            Self::Logger => "logger",
            Self::Settings => "settings",
            Self::Data => "data",
        }
    }

    /// Tab bound to the modifier+digit shortcut (`1` → scanner … `4` → data).
    #[must_use]
    pub fn from_shortcut_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Scanner),
            '2' => Some(Self::Logger),
            '3' => Some(Self::Settings),
            '4' => Some(Self::Data),
            _ => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown tab identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab {0:?}")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

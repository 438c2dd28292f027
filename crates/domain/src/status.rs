//! Connectivity status shown in the header.

/// Outcome of the startup connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemStatus {
    Online,
    #[default]
    Offline,
}

impl SystemStatus {
    #[must_use]
    pub fn from_online(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }

    #[must_use]
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
        }
    }

    /// Secondary line under the indicator.
    #[must_use]
    pub fn info(self) -> &'static str {
        match self {
            Self::Online => "system operational",
            Self::Offline => "connection failed",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Online => "status-indicator online",
            Self::Offline => "status-indicator offline",
        }
    }
}

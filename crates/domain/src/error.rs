//! Common error types used across the workspace.
//!
//! Every layer defines its own typed errors and converts into
//! [`DashboardError`] via `From` when crossing a port boundary.

use std::error::Error as StdError;

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error for every dashboard operation.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Client-side input validation failed; no request was issued.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The device answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The device could not be reached.
    #[error("network error")]
    Network(#[source] BoxError),

    /// The request did not complete within the configured bound.
    #[error("request timed out")]
    Timeout,

    /// The response body did not match the expected shape.
    #[error("unexpected response body")]
    Decode(#[source] BoxError),

    /// The export file could not be handed to the download sink.
    #[error("download failed")]
    Download(#[source] BoxError),
}

impl DashboardError {
    /// Render the error and its whole source chain on one line.
    ///
    /// This is the text shown to the user after prefixes such as
    /// `"save error: "`.
    #[must_use]
    pub fn user_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = StdError::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }

    /// Whether the device was reached and answered (as opposed to a
    /// transport-level failure).
    #[must_use]
    pub fn is_device_answer(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Invariant violations detected before talking to the device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The write payload is empty after trimming.
    #[error("enter data to write first")]
    EmptyWriteData,

    /// A numeric settings control does not hold a non-negative integer.
    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Settings field name (e.g. `scan_interval`).
        field: &'static str,
        /// The rejected control text.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = DashboardError::Status { status: 503 };
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn should_join_source_chain_in_user_message() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = DashboardError::Network(Box::new(io));
        assert_eq!(err.user_message(), "network error: connection refused");
    }

    #[test]
    fn should_include_validation_detail_in_user_message() {
        let err: DashboardError = ValidationError::InvalidNumber {
            field: "scan_interval",
            value: "abc".to_string(),
        }
        .into();
        assert_eq!(
            err.user_message(),
            "validation error: scan_interval must be a non-negative integer, got \"abc\""
        );
    }

    #[test]
    fn should_classify_device_answers() {
        assert!(DashboardError::Status { status: 500 }.is_device_answer());
        assert!(!DashboardError::Network("refused".into()).is_device_answer());
        assert!(!DashboardError::Timeout.is_device_answer());
    }
}

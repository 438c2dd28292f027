//! HTTP adapter error types.

use pn2133_domain::error::DashboardError;

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The configured base URL is not an absolute `http` URL.
    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),

    /// The reqwest client could not be built.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The device answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Sending the request or reading the response failed.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl From<HttpError> for DashboardError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status } => Self::Status { status },
            HttpError::Transport(err) if err.is_timeout() => Self::Timeout,
            HttpError::Transport(err) if err.is_decode() => Self::Decode(Box::new(err)),
            HttpError::Transport(err) => Self::Network(Box::new(err)),
            other @ (HttpError::InvalidBaseUrl(_) | HttpError::Build(_)) => {
                Self::Network(Box::new(other))
            }
        }
    }
}

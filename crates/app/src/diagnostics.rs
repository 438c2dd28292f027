//! Developer diagnostics: raw checks against the device that bypass the
//! render pipeline and report through the log.

use pn2133_domain::tag_log::LogsResponse;

use crate::ports::{Clock, DashboardView, DeviceApi, Downloader, UserPrompt};
use crate::services::dashboard::{DashboardClient, ScanOutcome};

/// Debugging handle borrowed from a running client.
pub struct Diagnostics<'a, A, V, P, D, C> {
    client: &'a DashboardClient<A, V, P, D, C>,
}

impl<'a, A, V, P, D, C> Diagnostics<'a, A, V, P, D, C>
where
    A: DeviceApi,
    V: DashboardView,
    P: UserPrompt,
    D: Downloader,
    C: Clock,
{
    pub fn new(client: &'a DashboardClient<A, V, P, D, C>) -> Self {
        Self { client }
    }

    /// Probe the device without touching the status indicator.
    pub async fn check_api(&self) -> bool {
        match self.client.api().probe().await {
            Ok(()) => {
                tracing::info!("api status: ok");
                true
            }
            Err(err) if err.is_device_answer() => {
                tracing::info!(error = %err, "api status: failed");
                false
            }
            Err(err) => {
                tracing::error!(error = %err.user_message(), "api error");
                false
            }
        }
    }

    /// Run a regular scan through the client.
    pub async fn test_scan(&self) -> ScanOutcome {
        tracing::info!("testing scan");
        self.client.perform_scan().await
    }

    /// Fetch the logs and dump them to the log without rendering.
    pub async fn dump_logs(&self) -> Option<LogsResponse> {
        match self.client.api().logs().await {
            Ok(logs) => {
                tracing::info!(count = logs.count, logs = ?logs.logs, "current logs");
                Some(logs)
            }
            Err(err) => {
                tracing::error!(error = %err.user_message(), "logs error");
                None
            }
        }
    }
}

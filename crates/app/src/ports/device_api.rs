//! Device API port: the reader's HTTP surface.
//!
//! | Method | Path | Port method |
//! |--------|------|-------------|
//! | GET  | `/api/settings` | [`probe`](DeviceApi::probe), [`fetch_settings`](DeviceApi::fetch_settings) |
//! | POST | `/api/settings` | [`save_settings`](DeviceApi::save_settings), [`patch_settings`](DeviceApi::patch_settings) |
//! | GET  | `/api/scan` | [`scan`](DeviceApi::scan) |
//! | POST | `/api/write` | [`write_tag`](DeviceApi::write_tag) |
//! | GET  | `/api/entropy` | [`entropy`](DeviceApi::entropy) |
//! | GET  | `/api/logs` | [`logs`](DeviceApi::logs) |
//! | POST | `/api/clear` | [`clear_logs`](DeviceApi::clear_logs) |

use std::future::Future;
use std::sync::Arc;

use pn2133_domain::entropy::EntropySample;
use pn2133_domain::error::DashboardError;
use pn2133_domain::scan::{ScanResult, WriteResponse};
use pn2133_domain::settings::{Settings, SettingsPatch};
use pn2133_domain::tag_log::LogsResponse;

/// Client-side view of the reader's REST API.
///
/// Implementations bound every request in time; a request that does not
/// complete surfaces as [`DashboardError::Timeout`].
pub trait DeviceApi: Send + Sync {
    /// Cheap reachability check. Any 2xx answer is success.
    fn probe(&self) -> impl Future<Output = Result<(), DashboardError>> + Send;

    /// Fetch the full settings object.
    fn fetch_settings(&self) -> impl Future<Output = Result<Settings, DashboardError>> + Send;

    /// Replace the full settings object.
    fn save_settings(
        &self,
        settings: &Settings,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send;

    /// Fast-path partial update of one or two fields.
    fn patch_settings(
        &self,
        patch: &SettingsPatch,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send;

    /// Trigger one read attempt.
    ///
    /// A business failure is returned as `Ok` with `success: false`.
    fn scan(&self) -> impl Future<Output = Result<ScanResult, DashboardError>> + Send;

    /// Write `data` to the tag in the field.
    ///
    /// A business failure is returned as `Ok` with `success: false`.
    fn write_tag(
        &self,
        data: &str,
    ) -> impl Future<Output = Result<WriteResponse, DashboardError>> + Send;

    /// Fetch the current entropy sample.
    fn entropy(&self) -> impl Future<Output = Result<EntropySample, DashboardError>> + Send;

    /// Fetch the tag logs (oldest first).
    fn logs(&self) -> impl Future<Output = Result<LogsResponse, DashboardError>> + Send;

    /// Delete every log entry on the device.
    fn clear_logs(&self) -> impl Future<Output = Result<(), DashboardError>> + Send;
}

impl<T: DeviceApi> DeviceApi for Arc<T> {
    fn probe(&self) -> impl Future<Output = Result<(), DashboardError>> + Send {
        (**self).probe()
    }

    fn fetch_settings(&self) -> impl Future<Output = Result<Settings, DashboardError>> + Send {
        (**self).fetch_settings()
    }

    fn save_settings(
        &self,
        settings: &Settings,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send {
        (**self).save_settings(settings)
    }

    fn patch_settings(
        &self,
        patch: &SettingsPatch,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send {
        (**self).patch_settings(patch)
    }

    fn scan(&self) -> impl Future<Output = Result<ScanResult, DashboardError>> + Send {
        (**self).scan()
    }

    fn write_tag(
        &self,
        data: &str,
    ) -> impl Future<Output = Result<WriteResponse, DashboardError>> + Send {
        (**self).write_tag(data)
    }

    fn entropy(&self) -> impl Future<Output = Result<EntropySample, DashboardError>> + Send {
        (**self).entropy()
    }

    fn logs(&self) -> impl Future<Output = Result<LogsResponse, DashboardError>> + Send {
        (**self).logs()
    }

    fn clear_logs(&self) -> impl Future<Output = Result<(), DashboardError>> + Send {
        (**self).clear_logs()
    }
}

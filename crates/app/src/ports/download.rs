//! Download port: hands a generated file to the user.

use std::future::Future;

use pn2133_domain::error::DashboardError;

/// Sink for client-generated files (log exports).
pub trait Downloader: Send + Sync {
    /// Deliver `contents` under `file_name`.
    ///
    /// Failures are reported as [`DashboardError::Download`].
    fn download(
        &self,
        file_name: &str,
        mime: &str,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send;
}

impl<T: Downloader> Downloader for std::sync::Arc<T> {
    fn download(
        &self,
        file_name: &str,
        mime: &str,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<(), DashboardError>> + Send {
        (**self).download(file_name, mime, contents)
    }
}

//! File-backed download sink.

use std::path::PathBuf;

use pn2133_app::ports::Downloader;
use pn2133_domain::error::DashboardError;

/// Writes every download into one directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct FileDownloader {
    dir: PathBuf,
}

impl FileDownloader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Downloader for FileDownloader {
    async fn download(
        &self,
        file_name: &str,
        mime: &str,
        contents: Vec<u8>,
    ) -> Result<(), DashboardError> {
        let path = self.dir.join(file_name);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| DashboardError::Download(Box::new(err)))?;
        tokio::fs::write(&path, &contents)
            .await
            .map_err(|err| DashboardError::Download(Box::new(err)))?;

        tracing::info!(path = %path.display(), mime, bytes = contents.len(), "file downloaded");
        Ok(())
    }
}

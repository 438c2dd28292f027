//! # pn2133-adapter-http-reqwest
//!
//! Implements the [`DeviceApi`] port over HTTP/JSON with `reqwest`.
//!
//! ## Status handling
//!
//! Settings, entropy, logs and clear require a 2xx answer. Scan and write
//! decode the body whatever the status, because the reader reports business
//! failures as `{"success": false, "error": "..."}` on error statuses too;
//! only an undecodable non-2xx body becomes a status error.
//!
//! ## Transport
//!
//! The reader serves plain HTTP on its access point, and the client is built
//! without TLS support, so only `http://` base URLs are accepted.
//!
//! ## Timeouts
//!
//! Every request is bounded by [`HttpConfig::timeout_ms`]; an expired request
//! surfaces as [`DashboardError::Timeout`].
//!
//! ## Dependency rule
//!
//! Depends on `pn2133-app` (for the port trait) and `pn2133-domain`.

mod config;
mod error;

pub use config::HttpConfig;
pub use error::HttpError;

use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use pn2133_app::ports::DeviceApi;
use pn2133_domain::entropy::EntropySample;
use pn2133_domain::error::DashboardError;
use pn2133_domain::scan::{ScanResult, WriteRequest, WriteResponse};
use pn2133_domain::settings::{Settings, SettingsPatch};
use pn2133_domain::tag_log::LogsResponse;

const SETTINGS_PATH: &str = "/api/settings";
const SCAN_PATH: &str = "/api/scan";
const WRITE_PATH: &str = "/api/write";
const ENTROPY_PATH: &str = "/api/entropy";
const LOGS_PATH: &str = "/api/logs";
const CLEAR_PATH: &str = "/api/clear";

/// [`DeviceApi`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDeviceApi {
    client: Client,
    base_url: String,
}

impl HttpDeviceApi {
    /// Build a client for the reader at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBaseUrl`] when the URL is not an absolute
    /// `http` URL, or [`HttpError::Build`] when the client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        match Url::parse(&base_url) {
            Ok(url) if url.scheme() == "http" => {}
            _ => return Err(HttpError::InvalidBaseUrl(config.base_url.clone())),
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(HttpError::Build)?;

        tracing::debug!(
            base_url = %base_url,
            timeout_ms = config.timeout_ms,
            "device client ready"
        );
        Ok(Self { client, base_url })
    }

    /// Base URL the endpoint paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<Response, HttpError> {
        tracing::debug!(method = "GET", path, "device request");
        let response = self.client.get(self.url(path)).send().await?;
        require_success(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        Ok(self.get(path).await?.json().await?)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, HttpError> {
        tracing::debug!(method = "POST", path, "device request");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }
}

fn require_success(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(HttpError::Status {
            status: status.as_u16(),
        })
    }
}

/// Decode the body whatever the status; fall back to the status when a
/// non-2xx body does not decode.
async fn decode_any_status<T: DeserializeOwned>(response: Response) -> Result<T, HttpError> {
    let status = response.status();
    match response.json::<T>().await {
        Ok(value) => Ok(value),
        Err(err) if status.is_success() => Err(HttpError::Transport(err)),
        Err(_) => Err(HttpError::Status {
            status: status.as_u16(),
        }),
    }
}

impl DeviceApi for HttpDeviceApi {
    async fn probe(&self) -> Result<(), DashboardError> {
        self.get(SETTINGS_PATH).await?;
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<Settings, DashboardError> {
        Ok(self.get_json(SETTINGS_PATH).await?)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), DashboardError> {
        let response = self.post(SETTINGS_PATH, Some(settings)).await?;
        require_success(response)?;
        Ok(())
    }

    async fn patch_settings(&self, patch: &SettingsPatch) -> Result<(), DashboardError> {
        let response = self.post(SETTINGS_PATH, Some(patch)).await?;
        require_success(response)?;
        Ok(())
    }

    async fn scan(&self) -> Result<ScanResult, DashboardError> {
        let response = self
            .client
            .get(self.url(SCAN_PATH))
            .send()
            .await
            .map_err(HttpError::from)?;
        Ok(decode_any_status(response).await?)
    }

    async fn write_tag(&self, data: &str) -> Result<WriteResponse, DashboardError> {
        let body = WriteRequest {
            data: data.to_string(),
        };
        let response = self.post(WRITE_PATH, Some(&body)).await?;
        Ok(decode_any_status(response).await?)
    }

    async fn entropy(&self) -> Result<EntropySample, DashboardError> {
        Ok(self.get_json(ENTROPY_PATH).await?)
    }

    async fn logs(&self) -> Result<LogsResponse, DashboardError> {
        Ok(self.get_json(LOGS_PATH).await?)
    }

    async fn clear_logs(&self) -> Result<(), DashboardError> {
        let response = self.post::<()>(CLEAR_PATH, None).await?;
        require_success(response)?;
        Ok(())
    }
}

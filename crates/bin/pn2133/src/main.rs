//! # pn2133: PN2133 reader dashboard
//!
//! Composition root that wires all adapters together and runs the console
//! dashboard.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Construct the HTTP device client, the headless document, the console
//!   prompt and the file downloader (adapters)
//! - Construct the `DashboardClient`, injecting adapters via port traits
//! - Run the initial page setup and start the polling loops
//! - Read console commands until `quit`, end of input or Ctrl-C
//! - Stop polling before exiting
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod commands;
mod config;
mod console;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pn2133_adapter_headless::{Document, FileDownloader};
use pn2133_adapter_http_reqwest::HttpDeviceApi;
use pn2133_app::polling::PollingTasks;
use pn2133_app::ports::SystemClock;
use pn2133_app::services::dashboard::DashboardClient;

use crate::config::Config;
use crate::console::{Console, ConsolePrompt, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid logging filter")?,
        )
        .with_writer(std::io::stderr)
        .init();

    // Adapters
    let api = HttpDeviceApi::new(&config.http()).context("failed to create device client")?;
    tracing::info!(device = %api.base_url(), "pn2133 dashboard starting");
    let document = Arc::new(Document::new());
    let console = Arc::new(Console::stdio().context("failed to attach console")?);
    let prompt = ConsolePrompt::new(Arc::clone(&console));
    let downloader = FileDownloader::new(&config.export.dir);

    // Client
    let client = Arc::new(DashboardClient::new(
        api,
        Arc::clone(&document),
        prompt,
        downloader,
        SystemClock,
    ));

    client.start().await;
    let polling = PollingTasks::spawn(&client, config.polling());

    let session = Session {
        client: client.as_ref(),
        document: &document,
        console: console.as_ref(),
        export_dir: &config.export.dir,
    };
    session.show();

    let outcome = tokio::select! {
        () = session.run() => Ok(()),
        signal = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            signal.context("failed to listen for ctrl-c")
        }
    };

    polling.shutdown().await;
    tracing::info!("pn2133 dashboard stopped");
    outcome
}

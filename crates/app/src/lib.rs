//! # pn2133-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DeviceApi`: the reader's HTTP surface (`/api/*`)
//!   - `DashboardView`: the render target (element contract of the markup)
//!   - `UserPrompt`: blocking acknowledgments and confirmations
//!   - `Downloader`: hands an export file to the user
//!   - `Clock`: current time and display offset
//! - Provide the **`DashboardClient`** use-cases: tab navigation, connectivity
//!   check, scan, write, settings sync, logs, export, clear
//! - Provide **render** functions producing HTML fragments from askama templates
//! - Provide the **polling scheduler** (entropy, logs, clock)
//! - Map **keyboard shortcuts** and expose **diagnostics**
//!
//! ## Dependency rule
//! Depends on `pn2133-domain` only (plus `tokio` for timers and tasks and
//! `askama` for fragment templates).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod diagnostics;
pub mod polling;
pub mod ports;
pub mod render;
pub mod services;
pub mod settings_form;
pub mod shortcuts;

#[cfg(test)]
mod testing;

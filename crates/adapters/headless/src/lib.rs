//! # pn2133-adapter-headless
//!
//! Browser-free render target for the dashboard.
//!
//! - [`Document`] keeps every element of the dashboard markup in memory,
//!   keyed by its id, and implements the `DashboardView` port.
//! - [`FileDownloader`] implements the `Downloader` port by writing export
//!   files into a directory.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `pn2133-app` and `pn2133-domain`.

mod document;
mod download;
mod markup;

pub use document::{Document, Element, ids, tab_button_key};
pub use download::FileDownloader;
pub use markup::text_content;

//! # pn2133-domain
//!
//! Pure domain model for the PN2133 RFID reader dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, epoch-millisecond timestamps
//! - Define **Settings** (the device configuration mirrored by the client)
//!   and the fast-path **SettingsPatch**
//! - Define **Scans** (one read attempt) and **Writes** (one write attempt)
//! - Define **Tag logs** (server-side history of reads)
//! - Define **Entropy samples** (background anomaly indicator)
//! - Define the **Tab** navigation states and the **system status**
//! - Define the **Export envelope** wrapped around downloaded logs
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod entropy;
pub mod export;
pub mod scan;
pub mod settings;
pub mod status;
pub mod tab;
pub mod tag_log;

// Deny unused code to catch dead code early
#![deny(unused)]
// Warn on unused dependencies
#![warn(unused_crate_dependencies)]
// Warn on redundant path prefixes (e.g., std::path::Path when Path is imported)
#![warn(unused_qualifications)]
// Use log::* macros instead of println!/eprintln! for proper log level control
#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Licensing wizard core for launching MATLAB from the browser.
//!
//! - `licensing`: input validators, the existing-license and NLM forms, and the
//!   MHLM login handshake
//! - `status`: read-only projections over the status snapshot
//! - `dispatch`: hand-off of finished payloads to the proxy
//! - `messaging`: the page's message bus and the login frame

//noinspection RsUnusedImport
// Silence false positives for dev dependencies used only in benches/
#[cfg(test)]
use criterion as _;

pub mod config;
pub mod dispatch;
pub mod error;
mod ignore_poison;
pub mod licensing;
pub mod logging;
pub mod messaging;
pub mod status;

pub use config::LicensingConfig;
pub use dispatch::{HttpDispatcher, LicensingDispatcher};
pub use error::{DispatchError, LicensingError, StatusError};
pub use licensing::{LicensingChoice, LicensingKind, MatlabVersion};
pub use status::{StatusSnapshot, StatusStore};

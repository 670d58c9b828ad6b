//! Hand-off of completed licensing payloads to the proxy.
//!
//! Flows only see the `LicensingDispatcher` trait. `HttpDispatcher` talks to the
//! real `set_licensing_info` endpoint; `RecordingDispatcher` keeps payloads in
//! memory.

mod http_client;


pub use http_client::{DispatchOutcome, HttpDispatcher};

use std::sync::Mutex;

use crate::ignore_poison::IgnorePoison;
use crate::licensing::LicensingChoice;

/// Receives completed licensing payloads. Fire-and-forget: failures surface
/// through the status store, not through this call.
pub trait LicensingDispatcher: Send + Sync {
    fn fetch_set_licensing(&self, payload: LicensingChoice);
}

/// Dispatcher that records every payload it receives.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    payloads: Mutex<Vec<LicensingChoice>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All payloads received so far, oldest first.
    pub fn payloads(&self) -> Vec<LicensingChoice> {
        self.payloads.lock_ignore_poison().clone()
    }

    pub fn count(&self) -> usize {
        self.payloads.lock_ignore_poison().len()
    }

    pub fn last(&self) -> Option<LicensingChoice> {
        self.payloads.lock_ignore_poison().last().cloned()
    }
}

impl LicensingDispatcher for RecordingDispatcher {
    fn fetch_set_licensing(&self, payload: LicensingChoice) {
        log::debug!("Recording licensing payload of type {:?}", payload.kind());
        self.payloads.lock_ignore_poison().push(payload);
    }
}

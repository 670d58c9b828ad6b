//! Submit flow shared by the licensing forms.
//!
//! ```text
//! Idle ──submit, version known──────────────▶ Submitted
//!   │                                            ▲
//!   └──submit, version unknown──▶ AwaitingVersion ┘ valid version entered
//! ```
//!
//! Submitting again from `Submitted` re-enters the flow. Submitting while
//! `AwaitingVersion` changes nothing.

use serde::Serialize;

use super::choice::LicensingChoice;
use super::field::FieldFeedback;
use super::version::{MatlabVersion, MatlabVersionInput};
use crate::dispatch::LicensingDispatcher;
use crate::error::LicensingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowState {
    Idle,
    /// The form was submitted but the MATLAB version is unknown; the version
    /// prompt is showing.
    AwaitingVersion,
    Submitted,
}

#[derive(Debug)]
pub struct LicensingFlow {
    state: FlowState,
    /// Payload waiting for its version. Only set while `AwaitingVersion`.
    pending: Option<LicensingChoice>,
    version_input: MatlabVersionInput,
}

impl Default for LicensingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LicensingFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            pending: None,
            version_input: MatlabVersionInput::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The payload parked while waiting for a version.
    pub fn pending(&self) -> Option<&LicensingChoice> {
        self.pending.as_ref()
    }

    /// Confirms intent to license with `choice`.
    ///
    /// Dispatches right away when `version_on_path` is known, otherwise parks the
    /// payload and asks for the version.
    pub fn submit(
        &mut self,
        choice: LicensingChoice,
        version_on_path: Option<MatlabVersion>,
        dispatcher: &dyn LicensingDispatcher,
    ) -> FlowState {
        if self.state == FlowState::AwaitingVersion {
            log::debug!("Licensing form resubmitted while waiting for the MATLAB version, ignoring");
            return self.state;
        }

        match version_on_path {
            Some(version) => {
                log::info!("Submitting {:?} licensing for MATLAB {version}", choice.kind());
                dispatcher.fetch_set_licensing(choice.with_matlab_version(version));
                self.state = FlowState::Submitted;
            }
            None => {
                log::info!("MATLAB version unknown, asking the user before submitting {:?}", choice.kind());
                self.pending = Some(choice);
                self.version_input = MatlabVersionInput::new();
                self.state = FlowState::AwaitingVersion;
            }
        }
        self.state
    }

    /// Types into the version prompt.
    pub fn enter_version(&mut self, value: impl Into<String>) {
        self.version_input.set_value(value);
    }

    pub fn version_feedback(&self) -> FieldFeedback {
        self.version_input.feedback()
    }

    pub fn version_input(&self) -> &MatlabVersionInput {
        &self.version_input
    }

    /// Submits the version prompt and dispatches the parked payload.
    ///
    /// An invalid version keeps the flow in `AwaitingVersion`.
    pub fn submit_version(&mut self, dispatcher: &dyn LicensingDispatcher) -> Result<FlowState, LicensingError> {
        if self.state != FlowState::AwaitingVersion {
            return Err(LicensingError::NotAwaitingVersion);
        }
        let version = self.version_input.submit()?;
        let choice = self.pending.take().ok_or(LicensingError::NotAwaitingVersion)?;

        log::info!("Submitting {:?} licensing for user-provided MATLAB {version}", choice.kind());
        dispatcher.fetch_set_licensing(choice.with_matlab_version(version));
        self.state = FlowState::Submitted;
        Ok(self.state)
    }
}

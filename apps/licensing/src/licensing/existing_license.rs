//! "Existing license" option: start MATLAB with the license already activated on
//! the host. Nothing to fill in besides, possibly, the MATLAB version.

use super::choice::LicensingChoice;
use super::flow::{FlowState, LicensingFlow};
use crate::dispatch::LicensingDispatcher;
use crate::error::LicensingError;
use crate::status::{StatusSnapshot, selectors};

#[derive(Debug, Default)]
pub struct ExistingLicenseForm {
    flow: LicensingFlow,
}

impl ExistingLicenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    pub fn flow(&self) -> &LicensingFlow {
        &self.flow
    }

    /// Handles the "Start MATLAB" button.
    pub fn submit(&mut self, status: &StatusSnapshot, dispatcher: &dyn LicensingDispatcher) -> FlowState {
        let version_on_path = selectors::resolved_matlab_version(status);
        self.flow
            .submit(LicensingChoice::existing_license(), version_on_path, dispatcher)
    }

    pub fn enter_version(&mut self, value: impl Into<String>) {
        self.flow.enter_version(value);
    }

    pub fn submit_version(&mut self, dispatcher: &dyn LicensingDispatcher) -> Result<FlowState, LicensingError> {
        self.flow.submit_version(dispatcher)
    }
}

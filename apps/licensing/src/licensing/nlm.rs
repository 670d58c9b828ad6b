//! Network License Manager option: the user enters one or more `port@hostname`
//! license servers.

use super::choice::LicensingChoice;
use super::field::{FieldFeedback, TextField};
use super::flow::{FlowState, LicensingFlow};
use super::validation::is_valid_nlm_connection_string;
use crate::dispatch::LicensingDispatcher;
use crate::error::LicensingError;
use crate::status::{StatusSnapshot, selectors};

#[derive(Debug, Default)]
pub struct NlmForm {
    connection_string: TextField,
    flow: LicensingFlow,
}

impl NlmForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    pub fn flow(&self) -> &LicensingFlow {
        &self.flow
    }

    pub fn set_connection_string(&mut self, value: impl Into<String>) {
        self.connection_string.set_value(value);
    }

    pub fn connection_string(&self) -> &str {
        self.connection_string.value()
    }

    pub fn feedback(&self) -> FieldFeedback {
        self.connection_string.feedback(is_valid_nlm_connection_string)
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        is_valid_nlm_connection_string(self.connection_string.value())
    }

    /// Handles the "Submit" button. Refused while the connection string is invalid.
    pub fn submit(
        &mut self,
        status: &StatusSnapshot,
        dispatcher: &dyn LicensingDispatcher,
    ) -> Result<FlowState, LicensingError> {
        if !self.can_submit() {
            return Err(LicensingError::InvalidConnectionString {
                value: self.connection_string.value().to_string(),
            });
        }
        let choice = LicensingChoice::nlm(self.connection_string.value());
        let version_on_path = selectors::resolved_matlab_version(status);
        Ok(self.flow.submit(choice, version_on_path, dispatcher))
    }

    pub fn enter_version(&mut self, value: impl Into<String>) {
        self.flow.enter_version(value);
    }

    pub fn submit_version(&mut self, dispatcher: &dyn LicensingDispatcher) -> Result<FlowState, LicensingError> {
        self.flow.submit_version(dispatcher)
    }
}

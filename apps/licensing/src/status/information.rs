//! Label, icon and alert level for the status panel.

use serde::Serialize;

use super::selectors;
use super::snapshot::{ErrorInfo, MatlabStatus, StatusSnapshot};
use crate::error::StatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Success,
    InfoReverse,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alert {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationDetails {
    pub label: &'static str,
    pub icon: Icon,
    pub alert: Alert,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub spinner: bool,
}

impl InformationDetails {
    const fn new(label: &'static str, icon: Icon, alert: Alert) -> Self {
        Self {
            label,
            icon,
            alert,
            spinner: false,
        }
    }

    const fn with_spinner(mut self) -> Self {
        self.spinner = true;
        self
    }
}

pub fn information_details(status: &StatusSnapshot) -> Result<InformationDetails, StatusError> {
    let error = selectors::error(status);
    let auth_enabled = selectors::auth_enabled(status);
    let invalid_token = selectors::invalid_token_error(auth_enabled, selectors::is_authenticated(status), error);
    details_for(&status.matlab.status, error, auth_enabled, invalid_token)
}

/// Decision table behind `information_details`.
///
/// Request timeouts come first, then a rejected auth token, then the MATLAB
/// status. A status without a rule is an error.
pub fn details_for(
    matlab_status: &MatlabStatus,
    error: Option<&ErrorInfo>,
    auth_enabled: bool,
    invalid_token: bool,
) -> Result<InformationDetails, StatusError> {
    if error.is_some_and(ErrorInfo::is_timeout) {
        return Ok(InformationDetails::new("Unknown", Icon::Warning, Alert::Warning));
    }

    if error.is_some() && auth_enabled && invalid_token {
        return Ok(InformationDetails::new(
            "Invalid Token supplied",
            Icon::Warning,
            Alert::Warning,
        ));
    }

    match matlab_status {
        MatlabStatus::Up => Ok(InformationDetails::new("Running", Icon::Success, Alert::Success)),
        MatlabStatus::Starting => Ok(InformationDetails::new(
            "Starting. This may take several minutes.",
            Icon::InfoReverse,
            Alert::Info,
        )
        .with_spinner()),
        MatlabStatus::Stopping => {
            Ok(InformationDetails::new("Stopping", Icon::InfoReverse, Alert::Info).with_spinner())
        }
        MatlabStatus::Down => {
            if error.is_some() {
                Ok(InformationDetails::new("Not running", Icon::Error, Alert::Danger))
            } else {
                Ok(InformationDetails::new("Not running", Icon::InfoReverse, Alert::Info))
            }
        }
        MatlabStatus::Other(status) => {
            log::error!("No display rule for MATLAB status \"{status}\"");
            Err(StatusError::UnknownMatlabStatus { status: status.clone() })
        }
    }
}

//! The licensing payload sent to `set_licensing_info`.

use serde::{Deserialize, Serialize};

use super::version::MatlabVersion;

/// Kind of licensing, as reported in the server's `licensingInfo.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicensingKind {
    ExistingLicense,
    Nlm,
    Mhlm,
    /// A type this client doesn't know about.
    #[serde(other)]
    Other,
}

/// The user's licensing choice.
///
/// "No choice yet" is `Option::<LicensingChoice>::None`. The payload is only
/// complete once `matlab_version` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LicensingChoice {
    /// Use the license already activated on the host.
    #[serde(rename_all = "camelCase")]
    ExistingLicense {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matlab_version: Option<MatlabVersion>,
    },
    /// Network License Manager.
    #[serde(rename_all = "camelCase")]
    Nlm {
        connection_string: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matlab_version: Option<MatlabVersion>,
    },
    /// Online license tied to a MathWorks account.
    #[serde(rename_all = "camelCase")]
    Mhlm {
        token: String,
        profile_id: String,
        email_address: String,
        source_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matlab_version: Option<MatlabVersion>,
    },
}

impl LicensingChoice {
    pub fn existing_license() -> Self {
        Self::ExistingLicense { matlab_version: None }
    }

    pub fn nlm(connection_string: impl Into<String>) -> Self {
        Self::Nlm {
            connection_string: connection_string.into(),
            matlab_version: None,
        }
    }

    pub fn kind(&self) -> LicensingKind {
        match self {
            Self::ExistingLicense { .. } => LicensingKind::ExistingLicense,
            Self::Nlm { .. } => LicensingKind::Nlm,
            Self::Mhlm { .. } => LicensingKind::Mhlm,
        }
    }

    pub fn matlab_version(&self) -> Option<&MatlabVersion> {
        match self {
            Self::ExistingLicense { matlab_version }
            | Self::Nlm { matlab_version, .. }
            | Self::Mhlm { matlab_version, .. } => matlab_version.as_ref(),
        }
    }

    /// Attaches the resolved version, replacing any earlier one.
    pub fn with_matlab_version(mut self, version: MatlabVersion) -> Self {
        match &mut self {
            Self::ExistingLicense { matlab_version }
            | Self::Nlm { matlab_version, .. }
            | Self::Mhlm { matlab_version, .. } => *matlab_version = Some(version),
        }
        self
    }

    /// Whether the payload can be sent: the server needs the version to start MATLAB.
    pub fn is_complete(&self) -> bool {
        self.matlab_version().is_some()
    }
}

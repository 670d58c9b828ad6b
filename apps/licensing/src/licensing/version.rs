//! MATLAB release identifiers and the version prompt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::field::{FieldFeedback, TextField};
use super::validation::is_valid_matlab_version;
use crate::error::LicensingError;

/// A MATLAB release, like `R2024a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatlabVersion(String);

impl MatlabVersion {
    /// Parses a user-entered release. No trimming: `" R2024a"` is rejected.
    pub fn parse(input: &str) -> Result<Self, LicensingError> {
        if is_valid_matlab_version(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(LicensingError::InvalidMatlabVersion {
                value: input.to_string(),
            })
        }
    }

    /// Wraps the version the server found on the PATH.
    ///
    /// The server's value is trusted as-is. Returns `None` when it's empty, which
    /// means the version is unknown.
    pub fn from_version_on_path(version: &str) -> Option<Self> {
        if version.is_empty() {
            return None;
        }
        if !is_valid_matlab_version(version) {
            log::debug!("Version on path \"{version}\" isn't in R20XYa form, using it anyway");
        }
        Some(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatlabVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MatlabVersion {
    type Err = LicensingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Prompt shown when the MATLAB version couldn't be determined.
///
/// Submission is disabled until the typed value is a valid release.
#[derive(Debug, Clone, Default)]
pub struct MatlabVersionInput {
    field: TextField,
}

impl MatlabVersionInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.field.set_value(value);
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }

    pub fn feedback(&self) -> FieldFeedback {
        self.field.feedback(is_valid_matlab_version)
    }

    pub fn can_submit(&self) -> bool {
        is_valid_matlab_version(self.field.value())
    }

    /// Returns the typed version, or an error if the submit button would be disabled.
    pub fn submit(&self) -> Result<MatlabVersion, LicensingError> {
        MatlabVersion::parse(self.field.value())
    }
}

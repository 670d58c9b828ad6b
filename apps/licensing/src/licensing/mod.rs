//! Licensing forms and the payload they hand to the proxy.
//!
//! Three ways to license MATLAB:
//! - `ExistingLicenseForm`: the license already on the host
//! - `NlmForm`: a network license manager
//! - `mhlm::MhlmSession`: a MathWorks account, via the embedded login
//!
//! All three end in a `LicensingChoice` with the MATLAB version attached,
//! passed to a `LicensingDispatcher`.

mod choice;
mod existing_license;
mod field;
mod flow;
pub mod mhlm;
mod nlm;
mod validation;
mod version;

#[cfg(test)]
mod flow_test;

pub use choice::{LicensingChoice, LicensingKind};
pub use existing_license::ExistingLicenseForm;
pub use field::{FieldFeedback, TextField};
pub use flow::{FlowState, LicensingFlow};
pub use nlm::NlmForm;
pub use validation::{is_valid_matlab_version, is_valid_nlm_connection_string};
pub use version::{MatlabVersion, MatlabVersionInput};

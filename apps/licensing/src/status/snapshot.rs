//! Read-only shape of the shared client-side status store.
//!
//! Field names follow the store's camelCase JSON. Everything has a default so a
//! partial store still deserializes.

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::licensing::LicensingKind;

/// MATLAB process state as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatlabStatus {
    Up,
    Starting,
    Stopping,
    #[default]
    Down,
    /// Anything else the server sent. The status projections refuse to display it.
    Other(String),
}

impl MatlabStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Up => "up",
            Self::Starting => "starting",
            Self::Stopping => "stopping",
            Self::Down => "down",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for MatlabStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "up" => Self::Up,
            "starting" => Self::Starting,
            "stopping" => Self::Stopping,
            "down" => Self::Down,
            _ => Self::Other(status),
        }
    }
}

impl From<&str> for MatlabStatus {
    fn from(status: &str) -> Self {
        Self::from(status.to_string())
    }
}

impl From<MatlabStatus> for String {
    fn from(status: MatlabStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatlabState {
    pub status: MatlabStatus,
    /// Release found on the PATH, like `R2024a`. `None` or empty if unknown.
    pub version_on_path: Option<String>,
    pub supported_versions: Vec<String>,
}

/// Licensing as currently applied on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicensingInfo {
    /// Missing when no licensing has been provided yet.
    #[serde(rename = "type")]
    pub kind: Option<LicensingKind>,
    pub email_address: Option<String>,
    pub entitlements: Vec<serde_json::Value>,
    pub entitlement_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerStatus {
    /// Deployment environment tag, like `"production"` or `"mw-integ"`.
    pub ws_env: String,
    pub is_submitting: bool,
    pub has_fetched: bool,
    pub is_fetching: bool,
    pub licensing_info: LicensingInfo,
    /// Consecutive failed status fetches.
    pub fetch_fail_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionStatus {
    pub is_active_client: bool,
    pub is_concurrency_enabled: bool,
    pub was_ever_active: bool,
    pub client_id: Option<String>,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self {
            is_active_client: true,
            is_concurrency_enabled: false,
            was_ever_active: false,
            client_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    pub enabled: bool,
    pub token: Option<String>,
    /// `true` once the token was accepted.
    pub status: bool,
}

/// Last error recorded by the status-fetch layer, already classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub status_code: Option<u16>,
}

impl ErrorInfo {
    pub const INVALID_TOKEN_ERROR: &'static str = "InvalidTokenError";

    pub fn is_timeout(&self) -> bool {
        self.status_code == Some(408)
    }

    pub fn is_invalid_token(&self) -> bool {
        self.error_type.as_deref() == Some(Self::INVALID_TOKEN_ERROR)
    }
}

impl From<&DispatchError> for ErrorInfo {
    fn from(err: &DispatchError) -> Self {
        Self {
            message: err.to_string(),
            error_type: Some(err.kind().to_string()),
            status_code: err.status_code(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerPosition {
    pub x: f64,
    pub y: f64,
}

/// Everything the status projections read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSnapshot {
    pub tutorial_hidden: bool,
    pub server_status: ServerStatus,
    pub session_status: SessionStatus,
    pub matlab: MatlabState,
    pub env_config: Option<serde_json::Value>,
    pub load_url: Option<String>,
    pub error: Option<ErrorInfo>,
    pub warnings: Vec<String>,
    #[serde(rename = "useMOS")]
    pub use_mos: bool,
    #[serde(rename = "useMRE")]
    pub use_mre: bool,
    pub authentication: AuthState,
    pub overlay_visibility: bool,
    pub trigger_position: Option<TriggerPosition>,
}

impl StatusSnapshot {
    /// Parses the store's JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

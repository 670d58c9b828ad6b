//! Error types for licensing flows, status projections, and dispatch.
//!
//! All three serialize with a `type` tag so the frontend can switch on them.

use serde::Serialize;

/// Errors raised by the licensing forms and the login handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum LicensingError {
    /// The NLM connection string is not a list of `port@host` entries.
    InvalidConnectionString { value: String },
    /// The version is not of the form `R2024a`.
    InvalidMatlabVersion { value: String },
    /// A version was submitted while the flow wasn't waiting for one.
    NotAwaitingVersion,
}

impl LicensingError {
    /// Returns a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidConnectionString { .. } => {
                "Enter the license server address as port@hostname. Separate multiple servers with ':', ';' or ','."
                    .to_string()
            }
            Self::InvalidMatlabVersion { .. } => {
                "Enter the MATLAB release you're starting, like R2024a or R2023b.".to_string()
            }
            Self::NotAwaitingVersion => "The MATLAB version isn't needed right now.".to_string(),
        }
    }
}

impl std::fmt::Display for LicensingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConnectionString { value } => {
                write!(f, "Invalid NLM connection string: \"{value}\"")
            }
            Self::InvalidMatlabVersion { value } => {
                write!(f, "Invalid MATLAB version: \"{value}\"")
            }
            Self::NotAwaitingVersion => write!(f, "Not waiting for a MATLAB version"),
        }
    }
}

impl std::error::Error for LicensingError {}

/// Errors raised while projecting the status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum StatusError {
    /// The server reported a MATLAB status we have no display rule for.
    UnknownMatlabStatus { status: String },
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMatlabStatus { status } => write!(f, "Unknown MATLAB status: \"{status}\"."),
        }
    }
}

impl std::error::Error for StatusError {}

/// Errors from sending the licensing payload to the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DispatchError {
    /// The HTTP client couldn't be built.
    Client { message: String },
    /// The request didn't finish within the configured timeout.
    Timeout,
    /// The proxy couldn't be reached.
    Connection { message: String },
    /// The proxy answered with a non-success status.
    Http { status_code: u16, message: String },
    /// The proxy answered with a body we couldn't parse.
    InvalidResponse { message: String },
}

impl DispatchError {
    /// HTTP status code to record for this failure, if any.
    ///
    /// Timeouts map to 408 so the status layer shows them as "Unknown".
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Timeout => Some(408),
            Self::Http { status_code, .. } => Some(*status_code),
            Self::Client { .. } | Self::Connection { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Short name used as the `type` of the error recorded in the status store.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Client { .. } => "ClientError",
            Self::Timeout => "TimeoutError",
            Self::Connection { .. } => "ConnectionError",
            Self::Http { .. } => "HttpError",
            Self::InvalidResponse { .. } => "InvalidResponseError",
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client { message } => write!(f, "Failed to create HTTP client: {message}"),
            Self::Timeout => write!(f, "Request to set licensing info timed out"),
            Self::Connection { message } => write!(f, "Failed to connect to the proxy: {message}"),
            Self::Http { status_code, message } => {
                write!(f, "Setting licensing info failed with {status_code}: {message}")
            }
            Self::InvalidResponse { message } => write!(f, "Invalid response from the proxy: {message}"),
        }
    }
}

impl std::error::Error for DispatchError {}

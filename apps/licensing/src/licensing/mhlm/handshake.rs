//! State machine for one login attempt with the embedded MathWorks login.
//!
//! ```text
//! Unloaded ──begin──▶ AwaitingNonce ──nonce──▶ AwaitingLogin ──login──▶ Complete
//!                                                    │                     ▲
//!                                                    └─login, no version─▶ AwaitingVersion
//! ```
//!
//! The machine does no I/O. It tells the caller what to post or dispatch.

use serde::Serialize;

use super::messages::{InboundMessage, InitMessage, LoadMessage, parse_inbound};
use super::{nonce, origin};
use crate::error::LicensingError;
use crate::licensing::{LicensingChoice, MatlabVersion};
use crate::messaging::WindowMessage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum HandshakeState {
    /// The login frame hasn't loaded yet.
    Unloaded,
    /// `init` was posted. Waiting for the frame's nonce.
    #[serde(rename_all = "camelCase")]
    AwaitingNonce { client_transaction_id: String },
    /// `load` was posted. Waiting for the user to sign in.
    #[serde(rename_all = "camelCase")]
    AwaitingLogin {
        client_transaction_id: String,
        transaction_id: String,
    },
    /// Signed in, but the MATLAB version must be entered first.
    AwaitingVersion,
    /// The mhlm payload was handed off.
    Complete,
}

/// What the caller should do after a frame message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeAction {
    Ignore,
    /// Post this to the frame.
    Reply(LoadMessage),
    /// Send this payload to the proxy.
    Dispatch(LicensingChoice),
    /// Show the version prompt.
    AwaitVersion,
}

#[derive(Debug)]
pub struct Handshake {
    login_origin: String,
    source_id: String,
    state: HandshakeState,
    pending: Option<LicensingChoice>,
}

impl Handshake {
    pub fn new(ws_env: &str) -> Self {
        Self::with_source_id(ws_env, nonce::source_id())
    }

    pub fn with_source_id(ws_env: &str, source_id: impl Into<String>) -> Self {
        Self {
            login_origin: origin::login_origin(ws_env),
            source_id: source_id.into(),
            state: HandshakeState::Unloaded,
            pending: None,
        }
    }

    pub fn login_origin(&self) -> &str {
        &self.login_origin
    }

    pub fn embedded_login_url(&self) -> String {
        origin::embedded_login_url(&self.login_origin)
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn state(&self) -> &HandshakeState {
        &self.state
    }

    /// Partial mhlm payload held while the version is asked for.
    pub fn pending(&self) -> Option<&LicensingChoice> {
        self.pending.as_ref()
    }

    /// Starts (or restarts, on a frame reload) the handshake with a fresh nonce.
    pub fn begin(&mut self, cached_username: &str) -> InitMessage {
        self.begin_with_nonce(cached_username, nonce::client_nonce())
    }

    pub fn begin_with_nonce(&mut self, cached_username: &str, client_transaction_id: impl Into<String>) -> InitMessage {
        let client_transaction_id = client_transaction_id.into();
        self.pending = None;
        self.state = HandshakeState::AwaitingNonce {
            client_transaction_id: client_transaction_id.clone(),
        };
        InitMessage::new(client_transaction_id, cached_username)
    }

    /// Feeds one `message` event to the machine.
    ///
    /// `version_on_path` is what the server reported at the time of the message.
    pub fn handle_message(&mut self, message: &WindowMessage, version_on_path: Option<MatlabVersion>) -> HandshakeAction {
        if message.origin != self.login_origin {
            log::debug!("Dropping message from foreign origin {}", message.origin);
            return HandshakeAction::Ignore;
        }

        match parse_inbound(&message.data) {
            Ok(InboundMessage::Nonce {
                client_transaction_id,
                transaction_id,
            }) => self.on_nonce(client_transaction_id, transaction_id),
            Ok(InboundMessage::Login {
                token,
                profile_id,
                email_address,
            }) => self.on_login(token, profile_id, email_address, version_on_path),
            Ok(InboundMessage::Other) => HandshakeAction::Ignore,
            Err(e) => {
                log::warn!("Dropping malformed message from the login frame: {e}");
                HandshakeAction::Ignore
            }
        }
    }

    fn on_nonce(&mut self, client_transaction_id: String, transaction_id: String) -> HandshakeAction {
        let expected = match &self.state {
            HandshakeState::AwaitingNonce {
                client_transaction_id: outstanding,
            }
            | HandshakeState::AwaitingLogin {
                client_transaction_id: outstanding,
                ..
            } => outstanding,
            other => {
                log::debug!("Ignoring nonce in state {other:?}");
                return HandshakeAction::Ignore;
            }
        };
        if !same_transaction_id(expected, &client_transaction_id) {
            log::warn!("Ignoring nonce for unknown client transaction {client_transaction_id}");
            return HandshakeAction::Ignore;
        }

        let outstanding = expected.clone();
        let reply = LoadMessage::new(client_transaction_id, transaction_id.clone(), self.source_id.clone());
        self.state = HandshakeState::AwaitingLogin {
            client_transaction_id: outstanding,
            transaction_id,
        };
        HandshakeAction::Reply(reply)
    }

    fn on_login(
        &mut self,
        token: String,
        profile_id: String,
        email_address: String,
        version_on_path: Option<MatlabVersion>,
    ) -> HandshakeAction {
        if !matches!(self.state, HandshakeState::AwaitingLogin { .. }) {
            log::debug!("Ignoring login in state {:?}", self.state);
            return HandshakeAction::Ignore;
        }

        let choice = LicensingChoice::Mhlm {
            token,
            profile_id,
            email_address,
            source_id: self.source_id.clone(),
            matlab_version: None,
        };
        match version_on_path {
            Some(version) => {
                self.state = HandshakeState::Complete;
                HandshakeAction::Dispatch(choice.with_matlab_version(version))
            }
            None => {
                self.pending = Some(choice);
                self.state = HandshakeState::AwaitingVersion;
                HandshakeAction::AwaitVersion
            }
        }
    }

    /// Completes the parked payload with a user-entered version.
    pub fn complete_with_version(&mut self, version: MatlabVersion) -> Result<LicensingChoice, LicensingError> {
        if self.state != HandshakeState::AwaitingVersion {
            return Err(LicensingError::NotAwaitingVersion);
        }
        let choice = self.pending.take().ok_or(LicensingError::NotAwaitingVersion)?;
        self.state = HandshakeState::Complete;
        Ok(choice.with_matlab_version(version))
    }
}

/// The frame may echo the id as a JSON number, which drops leading zeros and
/// may round long ids. Numeric echoes match when they denote the same value.
fn same_transaction_id(outstanding: &str, echoed: &str) -> bool {
    if outstanding == echoed {
        return true;
    }
    match (outstanding.parse::<f64>(), echoed.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.is_finite() && a == b,
        _ => false,
    }
}

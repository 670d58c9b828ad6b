//! A mounted MHLM login: the handshake wired to the page's message bus, the
//! login frame, and the dispatcher.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use super::handshake::{Handshake, HandshakeAction, HandshakeState};
use crate::dispatch::LicensingDispatcher;
use crate::error::LicensingError;
use crate::ignore_poison::IgnorePoison;
use crate::licensing::field::FieldFeedback;
use crate::licensing::version::MatlabVersionInput;
use crate::messaging::{LoginFrame, MessageBus, Subscription, WindowMessage};
use crate::status::{StatusStore, selectors};

/// Owns exactly one message listener for its lifetime. Dropping the session
/// (or calling `unmount`) removes the listener and discards the nonce.
pub struct MhlmSession {
    handshake: Arc<Mutex<Handshake>>,
    frame: Arc<dyn LoginFrame>,
    dispatcher: Arc<dyn LicensingDispatcher>,
    status: Arc<StatusStore>,
    version_input: MatlabVersionInput,
    _subscription: Subscription,
}

impl MhlmSession {
    pub fn mount(
        bus: &Arc<MessageBus>,
        frame: Arc<dyn LoginFrame>,
        dispatcher: Arc<dyn LicensingDispatcher>,
        status: Arc<StatusStore>,
    ) -> Self {
        let ws_env = selectors::ws_env(&status.snapshot()).to_string();
        Self::mount_with(bus, Handshake::new(&ws_env), frame, dispatcher, status)
    }

    /// Mounts with a prepared handshake, e.g. one with a fixed source id.
    pub fn mount_with(
        bus: &Arc<MessageBus>,
        handshake: Handshake,
        frame: Arc<dyn LoginFrame>,
        dispatcher: Arc<dyn LicensingDispatcher>,
        status: Arc<StatusStore>,
    ) -> Self {
        log::info!("Mounting MHLM login for {}", handshake.login_origin());
        let handshake = Arc::new(Mutex::new(handshake));

        let subscription = {
            let handshake = handshake.clone();
            let frame = frame.clone();
            let dispatcher = dispatcher.clone();
            let status = status.clone();
            bus.subscribe(move |message| {
                relay(&handshake, frame.as_ref(), dispatcher.as_ref(), &status, message);
            })
        };

        Self {
            handshake,
            frame,
            dispatcher,
            status,
            version_input: MatlabVersionInput::new(),
            _subscription: subscription,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Handshake> {
        self.handshake.lock_ignore_poison()
    }

    pub fn state(&self) -> HandshakeState {
        self.lock().state().clone()
    }

    pub fn login_origin(&self) -> String {
        self.lock().login_origin().to_string()
    }

    pub fn embedded_login_url(&self) -> String {
        self.lock().embedded_login_url()
    }

    pub fn source_id(&self) -> String {
        self.lock().source_id().to_string()
    }

    /// The frame's `load` event: posts `init` with a fresh nonce.
    pub fn frame_loaded(&self) {
        let cached_username = selectors::licensing_mhlm_username(&self.status.snapshot()).to_string();
        let (init, target_origin) = {
            let mut handshake = self.lock();
            (handshake.begin(&cached_username), handshake.login_origin().to_string())
        };
        post_json(self.frame.as_ref(), &init, &target_origin);
    }

    pub fn enter_version(&mut self, value: impl Into<String>) {
        self.version_input.set_value(value);
    }

    pub fn version_feedback(&self) -> FieldFeedback {
        self.version_input.feedback()
    }

    /// Submits the version prompt and dispatches the parked mhlm payload.
    pub fn submit_version(&mut self) -> Result<HandshakeState, LicensingError> {
        let version = self.version_input.submit()?;
        let (payload, state) = {
            let mut handshake = self.lock();
            let payload = handshake.complete_with_version(version)?;
            (payload, handshake.state().clone())
        };
        log::info!("Submitting mhlm licensing with user-provided MATLAB version");
        self.dispatcher.fetch_set_licensing(payload);
        Ok(state)
    }

    pub fn unmount(self) {
        log::info!("Unmounting MHLM login");
    }
}

impl std::fmt::Debug for MhlmSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MhlmSession")
            .field("handshake", &self.handshake)
            .field("version_input", &self.version_input)
            .finish_non_exhaustive()
    }
}

fn relay(
    handshake: &Mutex<Handshake>,
    frame: &dyn LoginFrame,
    dispatcher: &dyn LicensingDispatcher,
    status: &StatusStore,
    message: &WindowMessage,
) {
    let version_on_path = selectors::resolved_matlab_version(&status.snapshot());
    let (action, target_origin) = {
        let mut handshake = handshake.lock_ignore_poison();
        let action = handshake.handle_message(message, version_on_path);
        (action, handshake.login_origin().to_string())
    };

    match action {
        HandshakeAction::Ignore => {}
        HandshakeAction::Reply(load) => post_json(frame, &load, &target_origin),
        HandshakeAction::Dispatch(payload) => {
            log::info!("Submitting mhlm licensing");
            dispatcher.fetch_set_licensing(payload);
        }
        HandshakeAction::AwaitVersion => {
            log::info!("Signed in, but the MATLAB version is unknown; asking the user");
        }
    }
}

fn post_json<T: Serialize>(frame: &dyn LoginFrame, message: &T, target_origin: &str) {
    match serde_json::to_string(message) {
        Ok(data) => frame.post_message(&data, target_origin),
        Err(e) => log::error!("Couldn't serialize message for the login frame: {e}"),
    }
}

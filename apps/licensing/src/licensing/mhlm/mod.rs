//! MathWorks account login through the embedded login frame.
//!
//! `Handshake` is the pure state machine; `MhlmSession` binds it to a
//! `MessageBus` subscription and a `LoginFrame`.

mod handshake;
mod messages;
mod nonce;
mod origin;
mod session;


pub use handshake::{Handshake, HandshakeAction, HandshakeState};
pub use messages::{InboundMessage, InitMessage, LoadMessage, parse_inbound};
pub use nonce::{client_nonce, source_id};
pub use origin::{embedded_login_url, login_origin};
pub use session::MhlmSession;

//! Cross-window messaging: the page's `message` event and the login frame.
//!
//! Listeners are registered through `MessageBus::subscribe`, which hands back a
//! `Subscription`. Dropping the subscription unregisters the listener, so a
//! remounted component can't leave a stale listener behind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::ignore_poison::IgnorePoison;

/// A `message` event received by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowMessage {
    /// Origin of the sender, like `https://login.mathworks.com`.
    pub origin: String,
    /// JSON text.
    pub data: String,
}

impl WindowMessage {
    pub fn new(origin: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            data: data.into(),
        }
    }
}

/// The embedded login frame's content window.
pub trait LoginFrame: Send + Sync {
    /// Posts JSON text to the frame. Only a document at `target_origin` receives it.
    fn post_message(&self, data: &str, target_origin: &str);
}

type Listener = Arc<dyn Fn(&WindowMessage) + Send + Sync>;

/// The page's `message` event target.
#[derive(Default)]
pub struct MessageBus {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl MessageBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `listener` until the returned subscription is dropped.
    pub fn subscribe(self: &Arc<Self>, listener: impl Fn(&WindowMessage) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock_ignore_poison()
            .push((id, Arc::new(listener)));
        log::debug!("Message listener {id} registered");
        Subscription {
            bus: Arc::downgrade(self),
            id,
        }
    }

    /// Delivers a message to every listener registered at the time of the call.
    ///
    /// Listeners run without the registry lock held, so they may subscribe or
    /// unsubscribe.
    pub fn post(&self, message: &WindowMessage) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock_ignore_poison()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(message);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock_ignore_poison().len()
    }

    fn remove(&self, id: u64) {
        self.listeners
            .lock_ignore_poison()
            .retain(|(listener_id, _)| *listener_id != id);
        log::debug!("Message listener {id} removed");
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps one listener registered. Unregisters on drop.
#[derive(Debug)]
pub struct Subscription {
    bus: Weak<MessageBus>,
    id: u64,
}

impl Subscription {
    /// Unregisters now instead of at drop.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.id);
        }
    }
}

/// A login frame that keeps what was posted to it.
#[derive(Debug, Default)]
pub struct RecordingFrame {
    posted: Mutex<Vec<(String, String)>>,
}

impl RecordingFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(data, target_origin)` pairs, oldest first.
    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.lock_ignore_poison().clone()
    }

    /// Posted payloads parsed as JSON. Unparseable ones are skipped.
    pub fn posted_json(&self) -> Vec<serde_json::Value> {
        self.posted()
            .iter()
            .filter_map(|(data, _)| serde_json::from_str(data).ok())
            .collect()
    }
}

impl LoginFrame for RecordingFrame {
    fn post_message(&self, data: &str, target_origin: &str) {
        self.posted
            .lock_ignore_poison()
            .push((data.to_string(), target_origin.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_listener_receives_posted_messages() {
        let bus = MessageBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let _subscription = bus.subscribe(move |message| sink.lock().unwrap().push(message.clone()));

        bus.post(&WindowMessage::new("https://a.example", "{}"));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].origin, "https://a.example");
    }

    #[test]
    fn test_drop_unregisters_listener() {
        let bus = MessageBus::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.listener_count(), 1);

        bus.post(&WindowMessage::new("o", "d"));
        drop(subscription);
        bus.post(&WindowMessage::new("o", "d"));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_only_removes_its_own_listener() {
        let bus = MessageBus::new();
        let first = bus.subscribe(|_| {});
        let _second = bus.subscribe(|_| {});
        assert_eq!(bus.listener_count(), 2);

        first.unsubscribe();
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = MessageBus::new();
        let subscription = bus.subscribe(|_| {});
        drop(bus);
        drop(subscription);
    }

    #[test]
    fn test_listener_may_unsubscribe_during_delivery() {
        let bus = MessageBus::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let inner = slot.clone();
        let subscription = bus.subscribe(move |_| {
            inner.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(subscription);

        bus.post(&WindowMessage::new("o", "d"));
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_recording_frame_keeps_target_origin() {
        let frame = RecordingFrame::new();
        frame.post_message(r#"{"event":"init"}"#, "https://login.mathworks.com");
        frame.post_message("not json", "https://login.mathworks.com");

        assert_eq!(frame.posted().len(), 2);
        assert_eq!(frame.posted()[0].1, "https://login.mathworks.com");
        assert_eq!(frame.posted_json().len(), 1);
        assert_eq!(frame.posted_json()[0]["event"], "init");
    }
}

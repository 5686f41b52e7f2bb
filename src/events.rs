//! Session controller event bus.
//!
//! The HTTP client never navigates or prints on its own. It publishes
//! [`ClientEvent`]s here and whoever owns the UI (the CLI, a test, an
//! embedding application) subscribes and decides what to show.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The user can correct the input and retry.
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationReason {
    /// The backend answered 401; the session was cleared.
    SessionExpired,
    /// The user logged out explicitly.
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A transient message for the user.
    Notify { level: Level, message: String },
    /// A request to move to another view. Subscribers may ignore it.
    Navigate {
        to: String,
        reason: NavigationReason,
    },
    LoggedIn { username: Option<String> },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ClientEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event. Having no subscriber is fine.
    pub fn emit(&self, event: ClientEvent) {
        tracing::debug!(?event, "client event");
        let _ = self.tx.send(event);
    }

    pub fn notify(&self, level: Level, message: impl Into<String>) {
        self.emit(ClientEvent::Notify {
            level,
            message: message.into(),
        });
    }

    pub fn navigate(&self, to: impl Into<String>, reason: NavigationReason) {
        self.emit(ClientEvent::Navigate {
            to: to.into(),
            reason,
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

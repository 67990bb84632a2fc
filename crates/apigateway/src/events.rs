use tokio::sync::broadcast;

pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Session-level events raised by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A request got 401 back; the local session was cleared before this was sent.
    AuthorizationLost { path: String },
}

pub fn channel() -> (
    broadcast::Sender<SessionEvent>,
    broadcast::Receiver<SessionEvent>,
) {
    broadcast::channel(EVENT_CHANNEL_CAPACITY)
}

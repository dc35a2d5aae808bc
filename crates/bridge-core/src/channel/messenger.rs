use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;

use crate::channel::error::ChannelError;

/// Raw handler installed on a channel name.
pub type BinaryMessageHandler = Arc<dyn Fn(&[u8], BinaryReply) + Send + Sync>;

/// One-shot slot for the reply to a single inbound message.
///
/// Consuming `send` makes a second reply impossible.
pub struct BinaryReply {
    channel: String,
    sender: oneshot::Sender<Vec<u8>>,
}

impl BinaryReply {
    /// Creates a reply slot and the receiver the host awaits on.
    pub fn channel(channel: &str) -> (Self, oneshot::Receiver<Vec<u8>>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                channel: channel.to_string(),
                sender,
            },
            receiver,
        )
    }

    pub fn channel_name(&self) -> &str {
        &self.channel
    }

    /// Delivers the reply. Fails when the host already stopped listening.
    pub fn send(self, bytes: Vec<u8>) -> Result<(), ChannelError> {
        let channel = self.channel;
        self.sender
            .send(bytes)
            .map_err(|_| ChannelError::ReplyDropped { channel })
    }
}

impl fmt::Debug for BinaryReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryReply")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

/// Host-provided conduit plugins attach channel handlers to.
pub trait BinaryMessenger: Send + Sync {
    /// Installs `handler` on `channel`, replacing any previous one. `None` removes it.
    fn set_message_handler(&self, channel: &str, handler: Option<BinaryMessageHandler>);

    /// Whether a handler is currently installed on `channel`.
    fn has_handler(&self, channel: &str) -> bool;
}

/// Messenger living entirely inside the process, used by [`Host`](crate::kernel::Host).
#[derive(Default)]
pub struct InMemoryMessenger {
    handlers: Mutex<HashMap<String, BinaryMessageHandler>>,
}

impl InMemoryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    fn handlers(&self) -> MutexGuard<'_, HashMap<String, BinaryMessageHandler>> {
        // A panicking handler runs outside the lock, so the map itself is never left half-updated.
        self.handlers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Hands `message` to the handler of `channel`.
    ///
    /// Returns `false` when nobody listens; the reply is then answered with the
    /// empty message so the sender is never left waiting.
    pub fn deliver(&self, channel: &str, message: &[u8], reply: BinaryReply) -> bool {
        let handler = self.handlers().get(channel).cloned();
        match handler {
            Some(handler) => {
                log::trace!("Delivering {} byte(s) on channel '{}'", message.len(), channel);
                handler(message, reply);
                true
            }
            None => {
                log::debug!("No handler on channel '{}', replying empty", channel);
                if let Err(e) = reply.send(Vec::new()) {
                    log::warn!("Failed to send empty reply: {}", e);
                }
                false
            }
        }
    }

    /// Names of all channels with a handler, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers().keys().cloned().collect();
        names.sort();
        names
    }

    /// Removes every handler.
    pub fn clear(&self) {
        self.handlers().clear();
    }
}

impl BinaryMessenger for InMemoryMessenger {
    fn set_message_handler(&self, channel: &str, handler: Option<BinaryMessageHandler>) {
        let mut handlers = self.handlers();
        match handler {
            Some(handler) => {
                if handlers.insert(channel.to_string(), handler).is_some() {
                    log::debug!("Replaced existing handler on channel '{}'", channel);
                }
            }
            None => {
                handlers.remove(channel);
            }
        }
    }

    fn has_handler(&self, channel: &str) -> bool {
        self.handlers().contains_key(channel)
    }
}

impl fmt::Debug for InMemoryMessenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryMessenger")
            .field("channels", &self.channel_names())
            .finish()
    }
}

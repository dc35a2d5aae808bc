//! # Bridge Core Channel Errors
//!
//! Failures while moving bytes between the host and a plugin.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Reply receiver for channel '{channel}' is gone")]
    ReplyDropped { channel: String },

    #[error("Channel '{channel}' closed without replying")]
    ReplyLost { channel: String },
}

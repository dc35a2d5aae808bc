//! # Bridge Core Channels
//!
//! Message plumbing between the host and native plugins.
//!
//! - **[`messenger`]**: the [`BinaryMessenger`] seam plugins register raw handlers
//!   on, the one-shot [`BinaryReply`] slot, and the host-side
//!   [`InMemoryMessenger`].
//! - **[`method_channel`]**: [`MethodChannel`] decodes raw messages into
//!   [`MethodCall`](crate::codec::MethodCall)s and hands the plugin a
//!   [`MethodResult`] that can answer exactly once.
//! - **[`error`]**: [`ChannelError`](error::ChannelError).
pub mod error;
pub mod messenger;
pub mod method_channel;

pub use error::ChannelError;
pub use messenger::{BinaryMessageHandler, BinaryMessenger, BinaryReply, InMemoryMessenger};
pub use method_channel::{MethodChannel, MethodResult};

#[cfg(test)]
mod tests;

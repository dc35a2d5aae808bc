//! # Bridge Core Kernel
//!
//! The `kernel` module holds the pieces every other part of the bridge leans on:
//!
//! - **Host bootstrapping**: the in-process [`Host`](bootstrap::Host) stands in for
//!   the desktop UI framework. It owns the binary messenger, hands out registrars
//!   and delivers encoded method calls to whatever plugin registered a channel.
//! - **Core constants**: channel names, the bridge API version and the method
//!   names the plugins understand, in the `constants` submodule.
//! - **Error handling**: the crate-wide [`Error`](error::Error) enum and its
//!   `Result` alias in the `error` submodule.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::Host;
pub use error::{Error, Result};
// Test module declaration
#[cfg(test)]
mod tests;

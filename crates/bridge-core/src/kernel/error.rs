//! # Bridge Core Kernel Errors
//!
//! Defines the crate-wide [`Error`] enum. Each subsystem keeps its own typed
//! error (codec, channel, plugin system, storage) and converts into this one
//! with `?`, so callers only ever match on a single type.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::channel::error::ChannelError;
use crate::codec::error::CodecError;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registrar::RegistrarId;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Custom error type for the bridge
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Wire encoding or decoding failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Message delivery failed
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// A call was delivered to a channel nobody registered.
    #[error("No handler registered for channel '{0}'")]
    ChannelNotFound(String),

    /// A call named a registrar the host does not know (or already tore down).
    #[error("No registrar with id {0}")]
    RegistrarNotFound(RegistrarId),

    /// Error occurring during a specific host lifecycle phase.
    #[error("Host lifecycle error during {phase:?}: {message}")]
    HostLifecycleError {
        phase: HostLifecyclePhase,
        message: String,
    },
}

/// Represents a specific phase in the host's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum HostLifecyclePhase {
    #[error("Registration")]
    Registration,
    #[error("Delivery")]
    Delivery,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }
}

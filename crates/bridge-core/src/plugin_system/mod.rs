//! # Bridge Core Plugin System
//!
//! Everything needed to attach a native plugin to a host registrar.
//!
//! - **[`traits`]**: the [`Plugin`] trait, a named object answering method calls.
//! - **[`registrar`]**: the [`PluginRegistrar`] seam a host hands to plugins, and
//!   [`HostRegistrar`], the in-process implementation.
//! - **[`registry`]**: [`PluginRegistry`], the per-registrar set of owned plugins
//!   (at most one registration of a plugin per registrar, API compatibility).
//! - **[`init`]**: native initializers and the [`InitGuard`] that keeps them to a
//!   single run per process where the variant asks for it.
//! - **[`bridge`]**: the registration sequence itself: initialize, construct,
//!   hand ownership to the registrar, open the channel.
//! - **[`loader`]**: resolving `*_init` entry points from shared libraries.
//! - **[`version`]**: API version parsing and compatibility ranges.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
pub mod bridge;
pub mod error;
pub mod init;
pub mod loader;
pub mod registrar;
pub mod registry;
pub mod traits;
pub mod version;

pub use bridge::{attach_plugin, register_with_registrar};
pub use init::{ExternInitializer, InitGuard, InitPolicy, InitState, NativeInitializer};
pub use loader::DynamicInitializer;
pub use registrar::{HostRegistrar, PluginRegistrar, RegistrarId};
pub use registry::PluginRegistry;
pub use traits::Plugin;
pub use version::{ApiVersion, VersionRange};

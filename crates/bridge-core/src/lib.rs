pub mod channel;
pub mod codec;
pub mod kernel;
pub mod platform;
pub mod plugin_system;
pub mod storage;

// Re-export key public types/traits for the binary and the plugin crates
pub use channel::{BinaryMessenger, InMemoryMessenger, MethodChannel, MethodResult};
pub use codec::{EncodableValue, MethodCall, MethodResponse, StandardMethodCodec};
pub use kernel::Host;
pub use kernel::error::{Error, Result};
pub use platform::{OsVersion, PlatformVariant, VersionProbe, ViewHandle};
pub use plugin_system::{InitGuard, InitPolicy, NativeInitializer, Plugin, PluginRegistrar};
pub use storage::BridgeConfig;

#[cfg(test)]
mod tests;

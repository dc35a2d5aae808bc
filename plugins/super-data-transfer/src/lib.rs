//! # Super Data Transfer
//!
//! Registers the `super_data_transfer` channel with a host registrar and runs
//! the native data transfer initializer.
//!
//! | Variant | Initializer | Methods |
//! |---|---|---|
//! | Linux | every registration | none |
//! | Windows | once per process | `getPlatformVersion` |
use std::sync::Arc;

use bridge_core::kernel::constants::{METHOD_GET_PLATFORM_VERSION, SUPER_DATA_TRANSFER_CHANNEL};
use bridge_core::platform::platform_version_string;
use bridge_core::plugin_system::version::VersionRange;
use bridge_core::plugin_system::{ExternInitializer, register_with_registrar as register_plugin};
use bridge_core::{
    InitGuard, InitPolicy, MethodCall, MethodChannel, MethodResponse, PlatformVariant, Plugin,
    PluginRegistrar, Result, VersionProbe,
};

pub mod native;

pub use native::{init_count, super_data_transfer_init};

/// Channel name, also the plugin name.
pub const CHANNEL: &str = SUPER_DATA_TRANSFER_CHANNEL;

const COMPATIBLE_API_REQ: &str = "^0.1";

static INIT_GUARD: InitGuard = InitGuard::new();
static INITIALIZER: ExternInitializer =
    ExternInitializer::new("super_data_transfer_init", super_data_transfer_init);

pub fn init_policy(variant: PlatformVariant) -> InitPolicy {
    match variant {
        PlatformVariant::Linux => InitPolicy::EveryRegistration,
        PlatformVariant::Windows => InitPolicy::OncePerProcess,
    }
}

pub fn supported_methods(variant: PlatformVariant) -> Vec<&'static str> {
    match variant {
        PlatformVariant::Linux => Vec::new(),
        PlatformVariant::Windows => vec![METHOD_GET_PLATFORM_VERSION],
    }
}

pub struct SuperDataTransferPlugin {
    variant: PlatformVariant,
    probe: Arc<dyn VersionProbe>,
}

impl SuperDataTransferPlugin {
    pub fn new(variant: PlatformVariant, probe: Arc<dyn VersionProbe>) -> Self {
        Self { variant, probe }
    }

    pub fn variant(&self) -> PlatformVariant {
        self.variant
    }
}

impl Plugin for SuperDataTransferPlugin {
    fn name(&self) -> &'static str {
        CHANNEL
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        VersionRange::or_log(self.name(), COMPATIBLE_API_REQ)
    }

    fn supported_methods(&self) -> Vec<&'static str> {
        supported_methods(self.variant)
    }

    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        match (self.variant, call.method.as_str()) {
            (PlatformVariant::Windows, METHOD_GET_PLATFORM_VERSION) => {
                MethodResponse::Success(platform_version_string(self.probe.as_ref()).into())
            }
            _ => MethodResponse::NotImplemented,
        }
    }
}

/// Registers the `variant` flavour of the plugin with `registrar`.
pub fn register_with_registrar(
    registrar: &dyn PluginRegistrar,
    variant: PlatformVariant,
) -> Result<MethodChannel> {
    register_plugin(
        registrar,
        init_policy(variant),
        &INIT_GUARD,
        &INITIALIZER,
        |registrar| {
            let plugin: Arc<dyn Plugin> =
                Arc::new(SuperDataTransferPlugin::new(variant, registrar.version_probe()));
            plugin
        },
    )
}

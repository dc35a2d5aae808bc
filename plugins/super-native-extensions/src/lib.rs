//! # Super Native Extensions
//!
//! Registers the `super_native_extensions` channel. The Linux flavour keeps
//! the view of the window it was registered for and reports it through
//! `getFlutterView`; the Windows flavour answers nothing itself and only
//! guarantees its initializer runs once per process.
use std::sync::Arc;

use bridge_core::kernel::constants::{METHOD_GET_FLUTTER_VIEW, SUPER_NATIVE_EXTENSIONS_CHANNEL};
use bridge_core::plugin_system::version::VersionRange;
use bridge_core::plugin_system::{ExternInitializer, register_with_registrar as register_plugin};
use bridge_core::{
    EncodableValue, InitGuard, InitPolicy, MethodCall, MethodChannel, MethodResponse,
    PlatformVariant, Plugin, PluginRegistrar, Result, ViewHandle,
};

pub mod native;

pub use native::{init_count, super_native_extensions_init};

pub const CHANNEL: &str = SUPER_NATIVE_EXTENSIONS_CHANNEL;

const COMPATIBLE_API_REQ: &str = "^0.1";

static INIT_GUARD: InitGuard = InitGuard::new();
static INITIALIZER: ExternInitializer =
    ExternInitializer::new("super_native_extensions_init", super_native_extensions_init);

pub fn init_policy(variant: PlatformVariant) -> InitPolicy {
    match variant {
        PlatformVariant::Linux => InitPolicy::EveryRegistration,
        PlatformVariant::Windows => InitPolicy::OncePerProcess,
    }
}

pub fn supported_methods(variant: PlatformVariant) -> Vec<&'static str> {
    match variant {
        PlatformVariant::Linux => vec![METHOD_GET_FLUTTER_VIEW],
        PlatformVariant::Windows => Vec::new(),
    }
}

/// One instance per registrar; `view` is not owned.
pub struct SuperNativeExtensionsPlugin {
    variant: PlatformVariant,
    view: Option<ViewHandle>,
}

impl SuperNativeExtensionsPlugin {
    pub fn new(variant: PlatformVariant, view: Option<ViewHandle>) -> Self {
        Self { variant, view }
    }

    pub fn view(&self) -> Option<ViewHandle> {
        self.view
    }

    fn flutter_view_id(&self) -> i64 {
        self.view.map(ViewHandle::as_wire_id).unwrap_or(0)
    }
}

impl Plugin for SuperNativeExtensionsPlugin {
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
            (PlatformVariant::Linux, METHOD_GET_FLUTTER_VIEW) => {
                if self.view.is_none() {
                    log::debug!("No view captured at registration, answering 0");
                }
                MethodResponse::Success(EncodableValue::I64(self.flutter_view_id()))
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
                Arc::new(SuperNativeExtensionsPlugin::new(variant, registrar.view()));
            plugin
        },
    )
}

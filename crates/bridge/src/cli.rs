use bridge_core::{InitPolicy, MethodChannel, PlatformVariant, PluginRegistrar, Result};
use clap::ValueEnum;

/// Plugins linked into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PluginKind {
    #[value(name = "super_data_transfer")]
    SuperDataTransfer,
    #[value(name = "super_native_extensions")]
    SuperNativeExtensions,
}

impl PluginKind {
    pub const ALL: [PluginKind; 2] = [PluginKind::SuperDataTransfer, PluginKind::SuperNativeExtensions];

    pub fn channel(self) -> &'static str {
        match self {
            PluginKind::SuperDataTransfer => super_data_transfer::CHANNEL,
            PluginKind::SuperNativeExtensions => super_native_extensions::CHANNEL,
        }
    }

    pub fn init_policy(self, variant: PlatformVariant) -> InitPolicy {
        match self {
            PluginKind::SuperDataTransfer => super_data_transfer::init_policy(variant),
            PluginKind::SuperNativeExtensions => super_native_extensions::init_policy(variant),
        }
    }

    pub fn supported_methods(self, variant: PlatformVariant) -> Vec<&'static str> {
        match self {
            PluginKind::SuperDataTransfer => super_data_transfer::supported_methods(variant),
            PluginKind::SuperNativeExtensions => super_native_extensions::supported_methods(variant),
        }
    }

    /// Times this plugin's native initializer ran in this process.
    pub fn init_count(self) -> usize {
        match self {
            PluginKind::SuperDataTransfer => super_data_transfer::init_count(),
            PluginKind::SuperNativeExtensions => super_native_extensions::init_count(),
        }
    }

    pub fn register(self, registrar: &dyn PluginRegistrar, variant: PlatformVariant) -> Result<MethodChannel> {
        match self {
            PluginKind::SuperDataTransfer => super_data_transfer::register_with_registrar(registrar, variant),
            PluginKind::SuperNativeExtensions => {
                super_native_extensions::register_with_registrar(registrar, variant)
            }
        }
    }
}

/// One line of the `plugins` listing.
pub fn describe(kind: PluginKind, variant: PlatformVariant) -> String {
    let methods = kind.supported_methods(variant);
    let methods = if methods.is_empty() {
        "-".to_string()
    } else {
        methods.join(",")
    };
    format!(
        "  - {:<24} {:<8} {:<19} {}",
        kind.channel(),
        variant.as_str(),
        kind.init_policy(variant).to_string(),
        methods
    )
}

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::channel::{BinaryMessenger, InMemoryMessenger};
use crate::platform::{VersionProbe, ViewHandle};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::PluginRegistry;
use crate::plugin_system::traits::Plugin;
use crate::plugin_system::version::ApiVersion;

/// Identity of a registrar within one host.
pub type RegistrarId = u64;

/// What a host hands a plugin at registration time.
pub trait PluginRegistrar: Send + Sync {
    fn id(&self) -> RegistrarId;

    /// Messenger channels are created on.
    fn messenger(&self) -> Arc<dyn BinaryMessenger>;

    /// Native view of the window this registrar belongs to, if the platform exposes one.
    fn view(&self) -> Option<ViewHandle>;

    /// OS version accessor.
    fn version_probe(&self) -> Arc<dyn VersionProbe>;

    /// Transfers ownership of `plugin` to the host.
    fn add_plugin(&self, plugin: Arc<dyn Plugin>) -> Result<(), PluginSystemError>;
}

/// Registrar handed out by [`Host`](crate::kernel::Host).
///
/// Each registrar stands for one window and owns that window's messenger, so
/// channels of the same name on two windows never see each other.
pub struct HostRegistrar {
    id: RegistrarId,
    messenger: Arc<InMemoryMessenger>,
    view: Option<ViewHandle>,
    probe: Arc<dyn VersionProbe>,
    registry: Mutex<PluginRegistry>,
}

impl HostRegistrar {
    pub fn new(
        id: RegistrarId,
        view: Option<ViewHandle>,
        probe: Arc<dyn VersionProbe>,
        api_version: ApiVersion,
    ) -> Self {
        Self {
            id,
            messenger: Arc::new(InMemoryMessenger::new()),
            view,
            probe,
            registry: Mutex::new(PluginRegistry::new(api_version)),
        }
    }

    /// Concrete messenger of this window, used by the host to deliver calls.
    pub fn host_messenger(&self) -> Arc<InMemoryMessenger> {
        Arc::clone(&self.messenger)
    }

    fn registry(&self) -> MutexGuard<'_, PluginRegistry> {
        self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Names of the plugins this registrar owns, in registration order.
    pub fn plugin_names(&self) -> Vec<String> {
        self.registry().plugin_names()
    }

    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.registry().get_plugin(name)
    }

    /// Detaches every channel of this window and releases the owned plugins.
    pub fn teardown(&self) {
        let mut registry = self.registry();
        self.messenger.clear();
        registry.clear();
        log::debug!("Registrar {} torn down", self.id);
    }
}

impl PluginRegistrar for HostRegistrar {
    fn id(&self) -> RegistrarId {
        self.id
    }

    fn messenger(&self) -> Arc<dyn BinaryMessenger> {
        self.messenger.clone()
    }

    fn view(&self) -> Option<ViewHandle> {
        self.view
    }

    fn version_probe(&self) -> Arc<dyn VersionProbe> {
        Arc::clone(&self.probe)
    }

    fn add_plugin(&self, plugin: Arc<dyn Plugin>) -> Result<(), PluginSystemError> {
        self.registry().register_plugin(plugin)
    }
}

impl fmt::Debug for HostRegistrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRegistrar")
            .field("id", &self.id)
            .field("view", &self.view)
            .field("plugins", &self.plugin_names())
            .field("channels", &self.messenger.channel_names())
            .finish()
    }
}

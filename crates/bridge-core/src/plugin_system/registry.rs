use std::collections::HashMap;
use std::sync::Arc;

use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::Plugin;
use crate::plugin_system::version::ApiVersion;

/// Plugins owned by one registrar, in registration order.
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
    order: Vec<String>,
    /// Current API version
    api_version: ApiVersion,
}

impl PluginRegistry {
    /// Create a new plugin registry with the specified API version
    pub fn new(api_version: ApiVersion) -> Self {
        Self {
            plugins: HashMap::new(),
            order: Vec::new(),
            api_version,
        }
    }

    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Takes ownership of `plugin`.
    ///
    /// Rejects a second plugin with the same name and plugins that accept none
    /// of the current API version.
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), PluginSystemError> {
        let id = plugin.name().to_string();

        if self.plugins.contains_key(&id) {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: id,
                message: "Plugin already registered with this registrar".to_string(),
            });
        }

        let compatible = plugin
            .compatible_api_versions()
            .iter()
            .any(|range| range.includes_api(&self.api_version));
        if !compatible {
            return Err(PluginSystemError::IncompatibleApi {
                plugin_id: id,
                api_version: self.api_version.to_string(),
            });
        }

        log::debug!("Registered plugin '{}' v{}", id, plugin.version());
        self.order.push(id.clone());
        self.plugins.insert(id, plugin);
        Ok(())
    }

    pub fn get_plugin(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(id).cloned()
    }

    /// Plugin names in registration order.
    pub fn plugin_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Releases every plugin, most recently registered first.
    pub fn clear(&mut self) {
        while let Some(id) = self.order.pop() {
            if self.plugins.remove(&id).is_some() {
                log::debug!("Released plugin '{}'", id);
            }
        }
    }
}

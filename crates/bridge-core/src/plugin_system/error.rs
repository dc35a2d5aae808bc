//! # Bridge Core Plugin System Errors
//!
//! Defines [`PluginSystemError`], raised while loading native initializers,
//! checking API compatibility and handing plugins to a registrar.
use std::path::PathBuf;

use crate::plugin_system::version::VersionError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin loading failed for '{plugin_id}': {source}")]
    LoadingError {
        plugin_id: String,
        path: Option<PathBuf>,
        #[source]
        source: Box<PluginSystemErrorSource>,
    },

    #[error("Plugin registration error for '{plugin_id}': {message}")]
    RegistrationError {
        plugin_id: String,
        message: String,
    },

    #[error("Plugin '{plugin_id}' is not compatible with API version {api_version}")]
    IncompatibleApi {
        plugin_id: String,
        api_version: String,
    },

    #[error("Version parsing error: {0}")]
    VersionParsing(#[from] VersionError),
}

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemErrorSource {
    #[error(transparent)]
    Library(#[from] libloading::Error),
}

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::platform::{OsVersion, PlatformVariant, StaticVersionProbe, VersionProbe, ViewHandle};
use crate::storage::error::StorageSystemError;

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Settings for a bridge host run.
///
/// Every key is optional; a missing key keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Plugin variant to register.
    pub platform: PlatformVariant,
    /// OS version reported to plugins, e.g. `"10.0"` or `"6.1"`. Unknown when absent.
    pub os_version: Option<String>,
    /// Native view identity given to the first registrar.
    pub view: Option<u64>,
    /// Number of registrars (windows) to create.
    pub windows: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            platform: PlatformVariant::default(),
            os_version: None,
            view: None,
            windows: 1,
        }
    }
}

impl BridgeConfig {
    /// Loads a configuration file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, StorageSystemError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
        })?;
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageSystemError::FileNotFound(path.to_path_buf()),
            _ => StorageSystemError::io(e, "read config", path.to_path_buf()),
        })?;
        let config = Self::from_str_with_format(&data, format)?;
        log::debug!("Loaded {} config from {}", format.extension(), path.display());
        Ok(config)
    }

    /// Deserialize from string based on format
    pub fn from_str_with_format(data: &str, format: ConfigFormat) -> Result<Self, StorageSystemError> {
        let deserialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::DeserializationError {
                format: format.extension().to_string(),
                source,
            }
        };
        match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| deserialization_error(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| deserialization_error(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| deserialization_error(Box::new(e))),
        }
    }

    /// Serialize to string based on format
    pub fn to_string_with_format(&self, format: ConfigFormat) -> Result<String, StorageSystemError> {
        let serialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::SerializationError {
                format: format.extension().to_string(),
                source,
            }
        };
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| serialization_error(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| serialization_error(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| serialization_error(Box::new(e))),
        }
    }

    /// Parsed `os_version`.
    pub fn os_version(&self) -> Result<Option<OsVersion>, StorageSystemError> {
        self.os_version
            .as_deref()
            .map(|raw| {
                raw.parse::<OsVersion>()
                    .map_err(|message| StorageSystemError::InvalidConfigValue {
                        key: "os_version".to_string(),
                        message,
                    })
            })
            .transpose()
    }

    /// Probe answering with the configured OS version.
    pub fn version_probe(&self) -> Result<Arc<dyn VersionProbe>, StorageSystemError> {
        Ok(Arc::new(StaticVersionProbe::new(self.os_version()?)))
    }

    pub fn view_handle(&self) -> Option<ViewHandle> {
        self.view.map(ViewHandle::new)
    }
}

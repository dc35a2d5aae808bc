//! # Bridge Core Storage
//!
//! Loading of the bridge configuration file. The format follows the file
//! extension: `.json` always, `.toml` and `.yaml`/`.yml` behind the
//! `toml-config` and `yaml-config` features.
pub mod config;
pub mod error;

pub use config::{BridgeConfig, ConfigFormat};
pub use error::StorageSystemError;

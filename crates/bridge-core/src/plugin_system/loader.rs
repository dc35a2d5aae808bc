use std::fmt;
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::kernel::constants::INIT_SYMBOL_SUFFIX;
use crate::plugin_system::error::{PluginSystemError, PluginSystemErrorSource};
use crate::plugin_system::init::NativeInitializer;

/// Name of the exported initializer for the plugin on `channel`.
pub fn symbol_for_channel(channel: &str) -> String {
    format!("{}{}", channel, INIT_SYMBOL_SUFFIX)
}

/// Native initializer resolved from a shared library at runtime.
///
/// The library stays loaded for as long as this value lives.
pub struct DynamicInitializer {
    path: PathBuf,
    symbol: String,
    entry: extern "C" fn(),
    _library: Library,
}

impl DynamicInitializer {
    /// Loads `path` and resolves `symbol` as a zero-argument `extern "C"` function.
    pub fn open(path: impl AsRef<Path>, symbol: &str) -> Result<Self, PluginSystemError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Loading native library {} for symbol '{}'", path.display(), symbol);

        // SAFETY: loading runs the library's static constructors; callers only
        // point this at plugin libraries built to be loaded by the host.
        let library = unsafe { Library::new(&path) }.map_err(|e| PluginSystemError::LoadingError {
            plugin_id: symbol.to_string(),
            path: Some(path.clone()),
            source: Box::new(PluginSystemErrorSource::Library(e)),
        })?;

        // SAFETY: the `*_init` convention is `extern "C" fn()`; the pointer is
        // only called while `_library` keeps the code mapped.
        let entry = unsafe { library.get::<extern "C" fn()>(symbol.as_bytes()) }
            .map(|sym| *sym)
            .map_err(|e| PluginSystemError::LoadingError {
                plugin_id: symbol.to_string(),
                path: Some(path.clone()),
                source: Box::new(PluginSystemErrorSource::Library(e)),
            })?;

        Ok(Self {
            path,
            symbol: symbol.to_string(),
            entry,
            _library: library,
        })
    }

    /// Loads the initializer of the plugin on `channel` (`<channel>_init`).
    pub fn for_channel(path: impl AsRef<Path>, channel: &str) -> Result<Self, PluginSystemError> {
        Self::open(path, &symbol_for_channel(channel))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl NativeInitializer for DynamicInitializer {
    fn name(&self) -> &str {
        &self.symbol
    }

    fn initialize(&self) {
        log::debug!("Calling {} from {}", self.symbol, self.path.display());
        (self.entry)()
    }
}

impl fmt::Debug for DynamicInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicInitializer")
            .field("path", &self.path)
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

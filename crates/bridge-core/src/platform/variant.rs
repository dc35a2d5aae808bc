use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which platform flavour of a plugin to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    Linux,
    Windows,
}

impl PlatformVariant {
    /// Variant matching the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            PlatformVariant::Windows
        } else {
            PlatformVariant::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformVariant::Linux => "linux",
            PlatformVariant::Windows => "windows",
        }
    }
}

impl Default for PlatformVariant {
    fn default() -> Self {
        Self::current()
    }
}

impl FromStr for PlatformVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" | "gtk" => Ok(PlatformVariant::Linux),
            "windows" | "win32" => Ok(PlatformVariant::Windows),
            other => Err(format!("Unknown platform '{}', expected 'linux' or 'windows'", other)),
        }
    }
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

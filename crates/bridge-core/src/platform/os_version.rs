use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Major/minor pair as reported by the NT kernel (Windows 7 is 6.1, 8 is 6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub const WINDOWS_7: OsVersion = OsVersion::new(6, 1);
    pub const WINDOWS_8: OsVersion = OsVersion::new(6, 2);
    pub const WINDOWS_10: OsVersion = OsVersion::new(10, 0);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for OsVersion {
    type Err = String;

    /// Parses `"10"`, `"10.0"` or `"6.1.7601"` (build numbers are ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("Empty OS version '{}'", s))?
            .parse::<u32>()
            .map_err(|e| format!("Invalid major version in '{}': {}", s, e))?;
        let minor = match parts.next() {
            Some(p) => p
                .parse::<u32>()
                .map_err(|e| format!("Invalid minor version in '{}': {}", s, e))?,
            None => 0,
        };
        Ok(Self::new(major, minor))
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Source of "is the OS at least X" answers.
pub trait VersionProbe: Send + Sync {
    /// The running version, if known.
    fn os_version(&self) -> Option<OsVersion>;

    fn is_windows_10_or_greater(&self) -> bool {
        self.os_version().is_some_and(|v| v >= OsVersion::WINDOWS_10)
    }

    fn is_windows_8_or_greater(&self) -> bool {
        self.os_version().is_some_and(|v| v >= OsVersion::WINDOWS_8)
    }

    fn is_windows_7_or_greater(&self) -> bool {
        self.os_version().is_some_and(|v| v >= OsVersion::WINDOWS_7)
    }
}

/// Probe answering from a fixed, possibly absent, version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticVersionProbe {
    version: Option<OsVersion>,
}

impl StaticVersionProbe {
    pub const fn new(version: Option<OsVersion>) -> Self {
        Self { version }
    }

    pub const fn unknown() -> Self {
        Self { version: None }
    }
}

impl VersionProbe for StaticVersionProbe {
    fn os_version(&self) -> Option<OsVersion> {
        self.version
    }
}

/// Text answered to `getPlatformVersion`.
///
/// Probes greatest-first; an OS below Windows 7 (or unknown) keeps only the
/// `"Windows "` prefix.
pub fn platform_version_string(probe: &dyn VersionProbe) -> String {
    let mut version = String::from("Windows ");
    if probe.is_windows_10_or_greater() {
        version.push_str("10+");
    } else if probe.is_windows_8_or_greater() {
        version.push('8');
    } else if probe.is_windows_7_or_greater() {
        version.push('7');
    }
    version
}

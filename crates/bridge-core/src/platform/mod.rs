//! # Bridge Core Platform Accessors
//!
//! The small slice of windowing and OS information the plugins answer with:
//! the identity of the host's native view and a probe for the running
//! Windows version.
pub mod os_version;
pub mod variant;
pub mod view;

pub use os_version::{platform_version_string, OsVersion, StaticVersionProbe, VersionProbe};
pub use variant::PlatformVariant;
pub use view::ViewHandle;

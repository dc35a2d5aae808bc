use std::io;
use std::path::PathBuf;

use crate::channel::error::ChannelError;
use crate::codec::error::CodecError;
use crate::kernel::error::{Error, HostLifecyclePhase};
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;

#[test]
fn test_subsystem_conversions() {
    let err: Error = CodecError::TrailingBytes { remaining: 2 }.into();
    assert!(matches!(err, Error::Codec(_)));
    assert_eq!(err.to_string(), "Codec error: 2 trailing byte(s) after decoded message");

    let err: Error = ChannelError::ReplyDropped { channel: "c".to_string() }.into();
    assert!(matches!(err, Error::Channel(_)));

    let err: Error = PluginSystemError::RegistrationError {
        plugin_id: "x".to_string(),
        message: "taken".to_string(),
    }
    .into();
    assert!(matches!(err, Error::PluginSystem(_)));
    assert_eq!(err.to_string(), "Plugin system error: Plugin registration error for 'x': taken");
}

#[test]
fn test_io_helper() {
    let err = Error::io(
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        "read config",
        PathBuf::from("/tmp/bridge.toml"),
    );
    match err {
        Error::StorageSystem(StorageSystemError::Io { operation, path, .. }) => {
            assert_eq!(operation, "read config");
            assert_eq!(path, PathBuf::from("/tmp/bridge.toml"));
        }
        other => panic!("Expected storage Io error, got {:?}", other),
    }
}

#[test]
fn test_lifecycle_error_display() {
    let err = Error::HostLifecycleError {
        phase: HostLifecyclePhase::Delivery,
        message: "late".to_string(),
    };
    assert_eq!(err.to_string(), "Host lifecycle error during Delivery: late");

    assert_eq!(Error::RegistrarNotFound(3).to_string(), "No registrar with id 3");
}

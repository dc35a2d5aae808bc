use std::str::FromStr;
use std::sync::Arc;

use crate::channel::BinaryMessenger;
use crate::codec::{EncodableValue, MethodCall, MethodResponse};
use crate::kernel::bootstrap::*;
use crate::kernel::error::{Error, HostLifecyclePhase};
use crate::platform::{OsVersion, StaticVersionProbe, VersionProbe, ViewHandle};
use crate::plugin_system::registrar::PluginRegistrar;
use crate::plugin_system::traits::Plugin;
use crate::plugin_system::version::VersionRange;

struct ProbePlugin {
    probe: Arc<dyn VersionProbe>,
}

impl Plugin for ProbePlugin {
    fn name(&self) -> &'static str {
        "probe_plugin"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        vec![VersionRange::from_str("^0.1").unwrap()]
    }

    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            "version" => MethodResponse::Success(EncodableValue::from(
                crate::platform::platform_version_string(self.probe.as_ref()),
            )),
            _ => MethodResponse::NotImplemented,
        }
    }
}

fn attach(registrar: &dyn PluginRegistrar) {
    let plugin: Arc<dyn Plugin> = Arc::new(ProbePlugin { probe: registrar.version_probe() });
    registrar.add_plugin(Arc::clone(&plugin)).unwrap();
    let channel = crate::channel::MethodChannel::standard(registrar.messenger(), plugin.name());
    crate::plugin_system::attach_plugin(&channel, plugin);
}

#[tokio::test]
async fn test_host_new() {
    let host = Host::new().expect("Host::new failed");
    assert_eq!(host.api_version().to_string(), crate::kernel::constants::API_VERSION);
    assert_eq!(host.registrar_count().await, 0);
    assert!(!host.is_shut_down());
}

#[tokio::test]
async fn test_create_registrar_assigns_increasing_ids() {
    let host = Host::new().unwrap();
    let first = host.create_registrar(Some(ViewHandle::new(7))).await.unwrap();
    let second = host.create_registrar(None).await.unwrap();

    assert!(second.id() > first.id());
    assert_eq!(first.view(), Some(ViewHandle::new(7)));
    assert_eq!(second.view(), None);
    assert_eq!(host.registrar_count().await, 2);
    assert!(host.registrar(first.id()).await.is_some());
    assert!(host.registrar(999).await.is_none());
}

#[tokio::test]
async fn test_invoke_method_round_trip() {
    let probe = Arc::new(StaticVersionProbe::new(Some(OsVersion::WINDOWS_8)));
    let host = Host::with_version_probe(probe).unwrap();
    let registrar = host.create_registrar(None).await.unwrap();
    attach(registrar.as_ref());

    let response = host
        .invoke_method(registrar.id(), "probe_plugin", &MethodCall::bare("version"))
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::Success(EncodableValue::from("Windows 8")));

    let response = host
        .invoke_method(registrar.id(), "probe_plugin", &MethodCall::bare("nope"))
        .await
        .unwrap();
    assert!(response.is_not_implemented());

    assert_eq!(
        host.registrar_plugins(registrar.id()).await,
        Some(vec!["probe_plugin".to_string()])
    );
}

#[tokio::test]
async fn test_invoke_unknown_channel() {
    let host = Host::new().unwrap();
    let registrar = host.create_registrar(None).await.unwrap();
    let err = host
        .invoke_method(registrar.id(), "missing", &MethodCall::bare("anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(ref name) if name == "missing"));
}

#[tokio::test]
async fn test_invoke_unknown_registrar() {
    let host = Host::new().unwrap();
    let err = host
        .invoke_method(42, "probe_plugin", &MethodCall::bare("version"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RegistrarNotFound(42)));
}

#[tokio::test]
async fn test_calls_reach_the_addressed_window_only() {
    let host = Host::new().unwrap();
    let first = host.create_registrar(Some(ViewHandle::new(1))).await.unwrap();
    let second = host.create_registrar(Some(ViewHandle::new(2))).await.unwrap();
    attach(first.as_ref());

    let err = host
        .invoke_method(second.id(), "probe_plugin", &MethodCall::bare("version"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(_)));

    attach(second.as_ref());
    first.teardown();

    let response = host
        .invoke_method(second.id(), "probe_plugin", &MethodCall::bare("version"))
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::Success(EncodableValue::from("Windows ")));
    assert!(matches!(
        host.invoke_method(first.id(), "probe_plugin", &MethodCall::bare("version")).await,
        Err(Error::ChannelNotFound(_))
    ));
}

#[tokio::test]
async fn test_shutdown_detaches_everything() {
    let host = Host::new().unwrap();
    let registrar = host.create_registrar(None).await.unwrap();
    attach(registrar.as_ref());
    assert!(registrar.messenger().has_handler("probe_plugin"));

    host.shutdown().await.unwrap();

    assert!(host.is_shut_down());
    assert_eq!(host.registrar_count().await, 0);
    assert!(registrar.plugin_names().is_empty());
    assert!(registrar.host_messenger().channel_names().is_empty());

    // Second shutdown is a no-op.
    host.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_host_rejects_work_after_shutdown() {
    let host = Host::new().unwrap();
    let registrar = host.create_registrar(None).await.unwrap();
    host.shutdown().await.unwrap();

    let err = host.create_registrar(None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::HostLifecycleError { phase: HostLifecyclePhase::Registration, .. }
    ));

    let err = host
        .invoke_method(registrar.id(), "probe_plugin", &MethodCall::bare("version"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::HostLifecycleError { phase: HostLifecyclePhase::Delivery, .. }
    ));
}

#[tokio::test]
async fn test_host_from_config() {
    let config = crate::storage::BridgeConfig {
        os_version: Some("10.0".to_string()),
        ..Default::default()
    };
    let host = Host::from_config(&config).unwrap();
    let registrar = host.create_registrar(None).await.unwrap();
    attach(registrar.as_ref());

    let response = host
        .invoke_method(registrar.id(), "probe_plugin", &MethodCall::bare("version"))
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::Success(EncodableValue::from("Windows 10+")));
}

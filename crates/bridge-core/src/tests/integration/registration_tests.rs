use std::sync::Arc;

use crate::codec::{EncodableValue, MethodCall, MethodResponse};
use crate::kernel::Host;
use crate::kernel::error::Error;
use crate::platform::{OsVersion, StaticVersionProbe, ViewHandle};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::{InitGuard, InitPolicy, PluginRegistrar, register_with_registrar};

use super::common::{CountingInitializer, TEST_CHANNEL, TestPlugin, setup_host};

#[tokio::test]
async fn test_guarded_registration_on_many_windows() {
    let host = setup_host();
    let guard = InitGuard::new();
    let init = CountingInitializer::default();

    for _ in 0..3 {
        let registrar = host.create_registrar(None).await.unwrap();
        register_with_registrar(
            registrar.as_ref(),
            InitPolicy::OncePerProcess,
            &guard,
            &init,
            TestPlugin::build,
        )
        .unwrap();
    }

    assert_eq!(init.runs(), 1);
    assert_eq!(host.registrar_count().await, 3);
}

#[tokio::test]
async fn test_unguarded_registration_runs_every_time() {
    let host = setup_host();
    let guard = InitGuard::new();
    let init = CountingInitializer::default();

    for _ in 0..3 {
        let registrar = host.create_registrar(None).await.unwrap();
        register_with_registrar(
            registrar.as_ref(),
            InitPolicy::EveryRegistration,
            &guard,
            &init,
            TestPlugin::build,
        )
        .unwrap();
    }

    assert_eq!(init.runs(), 3);
}

#[tokio::test]
async fn test_duplicate_registration_then_other_registrar() {
    let host = setup_host();
    let guard = InitGuard::new();
    let init = CountingInitializer::default();
    let first = host.create_registrar(None).await.unwrap();
    let second = host.create_registrar(None).await.unwrap();

    register_with_registrar(first.as_ref(), InitPolicy::OncePerProcess, &guard, &init, TestPlugin::build)
        .unwrap();
    let err = register_with_registrar(
        first.as_ref(),
        InitPolicy::OncePerProcess,
        &guard,
        &init,
        TestPlugin::build,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::PluginSystem(PluginSystemError::RegistrationError { .. })
    ));

    register_with_registrar(second.as_ref(), InitPolicy::OncePerProcess, &guard, &init, TestPlugin::build)
        .unwrap();
    assert_eq!(host.registrar_plugins(first.id()).await.unwrap(), vec![TEST_CHANNEL]);
    assert_eq!(host.registrar_plugins(second.id()).await.unwrap(), vec![TEST_CHANNEL]);
}

#[tokio::test]
async fn test_view_is_captured_at_registration() {
    let host = setup_host();
    let guard = InitGuard::new();
    let init = CountingInitializer::default();
    let registrar = host.create_registrar(Some(ViewHandle::new(0xdead_beef))).await.unwrap();
    register_with_registrar(
        registrar.as_ref(),
        InitPolicy::EveryRegistration,
        &guard,
        &init,
        TestPlugin::build,
    )
    .unwrap();

    let response = host
        .invoke_method(registrar.id(), TEST_CHANNEL, &MethodCall::bare("getFlutterView"))
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::Success(EncodableValue::I64(0xdead_beef)));
}

#[tokio::test]
async fn test_platform_version_through_host() {
    for (version, expected) in [
        (Some(OsVersion::new(10, 0)), "Windows 10+"),
        (Some(OsVersion::new(6, 3)), "Windows 8"),
        (Some(OsVersion::new(6, 1)), "Windows 7"),
        (Some(OsVersion::new(6, 0)), "Windows "),
        (None, "Windows "),
    ] {
        let host = Host::with_version_probe(Arc::new(StaticVersionProbe::new(version))).unwrap();
        let guard = InitGuard::new();
        let init = CountingInitializer::default();
        let registrar = host.create_registrar(None).await.unwrap();
        register_with_registrar(
            registrar.as_ref(),
            InitPolicy::OncePerProcess,
            &guard,
            &init,
            TestPlugin::build,
        )
        .unwrap();

        let response = host
            .invoke_method(registrar.id(), TEST_CHANNEL, &MethodCall::bare("getPlatformVersion"))
            .await
            .unwrap();
        assert_eq!(response, MethodResponse::Success(EncodableValue::from(expected)));
    }
}

#[tokio::test]
async fn test_shutdown_releases_plugins() {
    let host = setup_host();
    let guard = InitGuard::new();
    let init = CountingInitializer::default();
    let registrar = host.create_registrar(None).await.unwrap();
    register_with_registrar(
        registrar.as_ref(),
        InitPolicy::EveryRegistration,
        &guard,
        &init,
        TestPlugin::build,
    )
    .unwrap();
    let plugin = registrar.get_plugin(TEST_CHANNEL).unwrap();
    // Registrar plus channel handler.
    assert_eq!(Arc::strong_count(&plugin), 3);

    host.shutdown().await.unwrap();

    assert_eq!(Arc::strong_count(&plugin), 1);
    assert!(matches!(
        host.invoke_method(registrar.id(), TEST_CHANNEL, &MethodCall::bare("getFlutterView")).await,
        Err(Error::HostLifecycleError { .. })
    ));
}

#[tokio::test]
async fn test_each_window_answers_with_its_own_view() {
    let host = setup_host();
    let guard = InitGuard::new();
    let init = CountingInitializer::default();
    let first = host.create_registrar(Some(ViewHandle::new(1))).await.unwrap();
    let second = host.create_registrar(Some(ViewHandle::new(2))).await.unwrap();
    for registrar in [&first, &second] {
        register_with_registrar(
            registrar.as_ref(),
            InitPolicy::OncePerProcess,
            &guard,
            &init,
            TestPlugin::build,
        )
        .unwrap();
    }

    let call = MethodCall::bare("getFlutterView");
    assert_eq!(
        host.invoke_method(first.id(), TEST_CHANNEL, &call).await.unwrap(),
        MethodResponse::Success(EncodableValue::I64(1))
    );
    assert_eq!(
        host.invoke_method(second.id(), TEST_CHANNEL, &call).await.unwrap(),
        MethodResponse::Success(EncodableValue::I64(2))
    );

    first.teardown();

    assert_eq!(second.plugin_names(), vec![TEST_CHANNEL]);
    assert_eq!(
        host.invoke_method(second.id(), TEST_CHANNEL, &call).await.unwrap(),
        MethodResponse::Success(EncodableValue::I64(2))
    );
    assert!(matches!(
        host.invoke_method(first.id(), TEST_CHANNEL, &call).await,
        Err(Error::ChannelNotFound(_))
    ));
}

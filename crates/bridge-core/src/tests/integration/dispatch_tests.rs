use std::sync::Arc;

use crate::channel::{BinaryReply, MethodChannel, MethodResult};
use crate::codec::{EncodableValue, MethodCall, MethodCodec, MethodResponse, StandardMethodCodec};
use crate::kernel::Host;
use crate::kernel::constants::MALFORMED_CALL_CODE;
use crate::kernel::error::Error;
use crate::plugin_system::{HostRegistrar, InitGuard, InitPolicy, PluginRegistrar, register_with_registrar};

use super::common::{CountingInitializer, TEST_CHANNEL, TestPlugin, setup_host};

async fn registered_host() -> (Host, Arc<HostRegistrar>) {
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
    (host, registrar)
}

async fn deliver_raw(registrar: &HostRegistrar, bytes: &[u8]) -> MethodResponse {
    let (reply, receiver) = BinaryReply::channel(TEST_CHANNEL);
    assert!(registrar.host_messenger().deliver(TEST_CHANNEL, bytes, reply));
    StandardMethodCodec::new()
        .decode_response(&receiver.await.unwrap())
        .unwrap()
}

#[tokio::test]
async fn test_unknown_method_is_not_implemented() {
    let (host, registrar) = registered_host().await;
    let response = host
        .invoke_method(
            registrar.id(),
            TEST_CHANNEL,
            &MethodCall::new("copy", EncodableValue::from("text")),
        )
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::NotImplemented);
}

#[tokio::test]
async fn test_error_response_with_null_message() {
    let (host, registrar) = registered_host().await;
    let details = EncodableValue::Map(vec![(EncodableValue::from("n"), EncodableValue::I32(1))]);
    let response = host
        .invoke_method(registrar.id(), TEST_CHANNEL, &MethodCall::new("fail", details.clone()))
        .await
        .unwrap();
    assert_eq!(
        response,
        MethodResponse::Error {
            code: "failed".to_string(),
            message: None,
            details,
        }
    );
}

#[tokio::test]
async fn test_malformed_bytes_are_answered() {
    let (_host, registrar) = registered_host().await;

    // An int32 where the method name should be.
    let response = deliver_raw(&registrar, &[3, 1, 0, 0, 0]).await;
    assert!(matches!(response, MethodResponse::Error { ref code, .. } if code == MALFORMED_CALL_CODE));
}

#[tokio::test]
async fn test_deeply_nested_arguments_are_answered() {
    let (host, registrar) = registered_host().await;

    // Method "x" with 200k nested one-element lists as its argument.
    let mut bytes = vec![7, 1, b'x'];
    for _ in 0..200_000 {
        bytes.extend_from_slice(&[12, 1]);
    }
    bytes.push(0);

    let response = deliver_raw(&registrar, &bytes).await;
    match response {
        MethodResponse::Error { code, message, .. } => {
            assert_eq!(code, MALFORMED_CALL_CODE);
            assert!(message.unwrap_or_default().contains("nested too deeply"));
        }
        other => panic!("Expected malformed_call error, got {:?}", other),
    }

    // The channel keeps answering afterwards.
    let response = host
        .invoke_method(registrar.id(), TEST_CHANNEL, &MethodCall::bare("getFlutterView"))
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::Success(EncodableValue::I64(0)));
}

#[tokio::test]
async fn test_channel_without_handler() {
    let host = setup_host();
    let registrar = host.create_registrar(None).await.unwrap();
    let err = host
        .invoke_method(
            registrar.id(),
            "super_data_transfer",
            &MethodCall::bare("getPlatformVersion"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(_)));
}

#[tokio::test]
async fn test_dropped_result_answers_not_implemented() {
    let host = setup_host();
    let registrar = host.create_registrar(None).await.unwrap();
    let channel = MethodChannel::standard(registrar.messenger(), "forgetful");
    channel.set_method_call_handler(|_call: MethodCall, result: MethodResult| drop(result));

    let response = host
        .invoke_method(registrar.id(), "forgetful", &MethodCall::bare("anything"))
        .await
        .unwrap();
    assert!(response.is_not_implemented());
}

#[tokio::test]
async fn test_reply_to_departed_caller_does_not_panic() {
    let (host, registrar) = registered_host().await;
    let codec = StandardMethodCodec::new();
    let bytes = codec.encode_method_call(&MethodCall::bare("getFlutterView")).unwrap();

    let (reply, receiver) = BinaryReply::channel(TEST_CHANNEL);
    drop(receiver);
    assert!(registrar.host_messenger().deliver(TEST_CHANNEL, &bytes, reply));

    // The host keeps working afterwards.
    let response = host
        .invoke_method(registrar.id(), TEST_CHANNEL, &MethodCall::bare("getFlutterView"))
        .await
        .unwrap();
    assert_eq!(response, MethodResponse::Success(EncodableValue::I64(0)));
}

use std::sync::Arc;

use crate::channel::messenger::{BinaryMessenger, BinaryReply, InMemoryMessenger};
use crate::channel::method_channel::{MethodChannel, MethodResult};
use crate::codec::{EncodableValue, MethodCall, MethodCodec, MethodResponse, StandardMethodCodec};

fn setup() -> (Arc<InMemoryMessenger>, MethodChannel) {
    let messenger = Arc::new(InMemoryMessenger::new());
    let channel = MethodChannel::standard(messenger.clone(), "test_channel");
    (messenger, channel)
}

async fn call(messenger: &InMemoryMessenger, call: &MethodCall) -> MethodResponse {
    let codec = StandardMethodCodec::new();
    let bytes = codec.encode_method_call(call).unwrap();
    let (reply, receiver) = BinaryReply::channel("test_channel");
    messenger.deliver("test_channel", &bytes, reply);
    codec.decode_response(&receiver.await.unwrap()).unwrap()
}

#[tokio::test]
async fn test_handler_receives_decoded_call() {
    let (messenger, channel) = setup();
    channel.set_method_call_handler(|call: MethodCall, result: MethodResult| {
        match call.method.as_str() {
            "echo" => result.success(call.arguments),
            _ => result.not_implemented(),
        }
    });
    assert!(messenger.has_handler("test_channel"));

    let response = call(&messenger, &MethodCall::new("echo", EncodableValue::from("ping"))).await;
    assert_eq!(response, MethodResponse::Success(EncodableValue::from("ping")));

    let response = call(&messenger, &MethodCall::bare("unknown")).await;
    assert!(response.is_not_implemented());
}

#[tokio::test]
async fn test_error_response_reaches_caller() {
    let (messenger, channel) = setup();
    channel.set_method_call_handler(|_call, result: MethodResult| {
        result.error("boom", Some("failed".to_string()), EncodableValue::I32(7));
    });
    let response = call(&messenger, &MethodCall::bare("anything")).await;
    assert_eq!(
        response,
        MethodResponse::Error {
            code: "boom".to_string(),
            message: Some("failed".to_string()),
            details: EncodableValue::I32(7),
        }
    );
}

#[tokio::test]
async fn test_dropped_result_replies_not_implemented() {
    let (messenger, channel) = setup();
    channel.set_method_call_handler(|_call, result: MethodResult| {
        drop(result);
    });
    let response = call(&messenger, &MethodCall::bare("forgotten")).await;
    assert!(response.is_not_implemented());
}

#[tokio::test]
async fn test_malformed_call_is_answered_with_error() {
    let (messenger, channel) = setup();
    channel.set_method_call_handler(|_call, _result: MethodResult| {
        panic!("handler must not see malformed calls");
    });
    let (reply, receiver) = BinaryReply::channel("test_channel");
    messenger.deliver("test_channel", &[3, 0, 0, 0, 0], reply);
    let response = StandardMethodCodec::new()
        .decode_response(&receiver.await.unwrap())
        .unwrap();
    match response {
        MethodResponse::Error { code, .. } => assert_eq!(code, "malformed_call"),
        other => panic!("Expected malformed_call error, got {:?}", other),
    }
}

#[test]
fn test_response_to_vanished_host_does_not_panic() {
    let (messenger, channel) = setup();
    channel.set_method_call_handler(|_call, result: MethodResult| {
        result.success(EncodableValue::Bool(true));
    });
    let bytes = StandardMethodCodec::new()
        .encode_method_call(&MethodCall::bare("late"))
        .unwrap();
    let (reply, receiver) = BinaryReply::channel("test_channel");
    drop(receiver);
    assert!(messenger.deliver("test_channel", &bytes, reply));
}

#[test]
fn test_clear_method_call_handler() {
    let (messenger, channel) = setup();
    channel.set_method_call_handler(|_call, result: MethodResult| result.not_implemented());
    channel.clear_method_call_handler();
    assert!(!messenger.has_handler("test_channel"));
    assert_eq!(channel.name(), "test_channel");
}

use std::fmt;
use std::sync::Arc;

use crate::channel::messenger::{BinaryMessageHandler, BinaryMessenger, BinaryReply};
use crate::codec::{EncodableValue, MethodCall, MethodCodec, MethodResponse, StandardMethodCodec};
use crate::kernel::constants::MALFORMED_CALL_CODE;

/// Answer slot handed to a method call handler.
///
/// Every answering method consumes the result, so a call can be answered at
/// most once. A result dropped without an answer replies "not implemented".
pub struct MethodResult {
    channel: String,
    codec: Arc<dyn MethodCodec>,
    reply: Option<BinaryReply>,
}

impl MethodResult {
    pub fn new(channel: impl Into<String>, codec: Arc<dyn MethodCodec>, reply: BinaryReply) -> Self {
        Self {
            channel: channel.into(),
            codec,
            reply: Some(reply),
        }
    }

    pub fn success(mut self, value: impl Into<EncodableValue>) {
        self.respond(MethodResponse::Success(value.into()));
    }

    pub fn error(mut self, code: impl Into<String>, message: Option<String>, details: EncodableValue) {
        self.respond(MethodResponse::Error {
            code: code.into(),
            message,
            details,
        });
    }

    pub fn not_implemented(mut self) {
        self.respond(MethodResponse::NotImplemented);
    }

    /// Answers with an already built response.
    pub fn respond_with(mut self, response: MethodResponse) {
        self.respond(response);
    }

    fn respond(&mut self, response: MethodResponse) {
        let Some(reply) = self.reply.take() else {
            return;
        };
        let bytes = self
            .codec
            .encode_response(&response)
            .or_else(|e| {
                log::error!("Failed to encode response on channel '{}': {}", self.channel, e);
                self.codec.encode_response(&MethodResponse::Error {
                    code: "encoding_failed".to_string(),
                    message: Some(e.to_string()),
                    details: EncodableValue::Null,
                })
            })
            .unwrap_or_default();
        if let Err(e) = reply.send(bytes) {
            log::warn!("Failed to send method call response: {}", e);
        }
    }
}

impl Drop for MethodResult {
    fn drop(&mut self) {
        if self.reply.is_some() {
            log::error!(
                "Method call on channel '{}' was dropped without a response; replying not implemented",
                self.channel
            );
            self.respond(MethodResponse::NotImplemented);
        }
    }
}

impl fmt::Debug for MethodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodResult")
            .field("channel", &self.channel)
            .field("answered", &self.reply.is_none())
            .finish()
    }
}

/// Named call/response conduit on top of a [`BinaryMessenger`].
#[derive(Clone)]
pub struct MethodChannel {
    name: String,
    messenger: Arc<dyn BinaryMessenger>,
    codec: Arc<dyn MethodCodec>,
}

impl MethodChannel {
    pub fn new(
        messenger: Arc<dyn BinaryMessenger>,
        name: impl Into<String>,
        codec: Arc<dyn MethodCodec>,
    ) -> Self {
        Self {
            name: name.into(),
            messenger,
            codec,
        }
    }

    /// Channel using the [`StandardMethodCodec`].
    pub fn standard(messenger: Arc<dyn BinaryMessenger>, name: impl Into<String>) -> Self {
        Self::new(messenger, name, Arc::new(StandardMethodCodec::new()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installs `handler` for every call arriving on this channel.
    ///
    /// Calls that fail to decode never reach the handler; they are answered
    /// with a `malformed_call` error.
    pub fn set_method_call_handler<F>(&self, handler: F)
    where
        F: Fn(MethodCall, MethodResult) + Send + Sync + 'static,
    {
        let name = self.name.clone();
        let codec = Arc::clone(&self.codec);
        let binary: BinaryMessageHandler = Arc::new(move |message: &[u8], reply: BinaryReply| {
            let result = MethodResult::new(name.clone(), Arc::clone(&codec), reply);
            match codec.decode_method_call(message) {
                Ok(call) => {
                    log::debug!("Dispatching '{}' on channel '{}'", call.method, name);
                    handler(call, result);
                }
                Err(e) => {
                    log::warn!("Malformed method call on channel '{}': {}", name, e);
                    result.error(MALFORMED_CALL_CODE, Some(e.to_string()), EncodableValue::Null);
                }
            }
        });
        self.messenger.set_message_handler(&self.name, Some(binary));
    }

    /// Detaches the current handler.
    pub fn clear_method_call_handler(&self) {
        self.messenger.set_message_handler(&self.name, None);
    }
}

impl fmt::Debug for MethodChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodChannel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

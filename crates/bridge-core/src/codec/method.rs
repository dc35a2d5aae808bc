use crate::codec::error::CodecError;
use crate::codec::standard::{ByteReader, StandardMessageCodec};
use crate::codec::value::EncodableValue;

const ENVELOPE_SUCCESS: u8 = 0;
const ENVELOPE_ERROR: u8 = 1;

/// An inbound request: method name plus argument payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: EncodableValue,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: EncodableValue) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// A call without arguments.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, EncodableValue::Null)
    }
}

/// The single answer a method call receives.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(EncodableValue),
    Error {
        code: String,
        message: Option<String>,
        details: EncodableValue,
    },
    NotImplemented,
}

impl MethodResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, MethodResponse::NotImplemented)
    }

    /// JSON rendering used by the CLI.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MethodResponse::Success(value) => serde_json::json!({ "success": value.to_json() }),
            MethodResponse::Error { code, message, details } => serde_json::json!({
                "error": { "code": code, "message": message, "details": details.to_json() }
            }),
            MethodResponse::NotImplemented => serde_json::json!({ "notImplemented": true }),
        }
    }
}

/// Frames method calls and responses into byte envelopes.
pub trait MethodCodec: Send + Sync {
    fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>, CodecError>;
    fn decode_method_call(&self, bytes: &[u8]) -> Result<MethodCall, CodecError>;
    fn encode_response(&self, response: &MethodResponse) -> Result<Vec<u8>, CodecError>;
    fn decode_response(&self, bytes: &[u8]) -> Result<MethodResponse, CodecError>;
}

/// Method codec built on [`StandardMessageCodec`].
///
/// A call is the method name followed by the arguments. A success reply is a
/// `0` byte and the result, an error reply a `1` byte, the code, the message
/// (or null) and the details. "Not implemented" is the empty reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMethodCodec {
    values: StandardMessageCodec,
}

impl StandardMethodCodec {
    pub fn new() -> Self {
        Self {
            values: StandardMessageCodec::new(),
        }
    }
}

impl MethodCodec for StandardMethodCodec {
    fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.values
            .write_value(&mut buf, &EncodableValue::String(call.method.clone()))?;
        self.values.write_value(&mut buf, &call.arguments)?;
        Ok(buf)
    }

    fn decode_method_call(&self, bytes: &[u8]) -> Result<MethodCall, CodecError> {
        let mut reader = ByteReader::new(bytes);
        let method = match self.values.read_value(&mut reader)? {
            EncodableValue::String(name) => name,
            other => {
                return Err(CodecError::InvalidEnvelope(format!(
                    "method name must be a string, got {}",
                    other.type_name()
                )));
            }
        };
        let arguments = if reader.remaining() == 0 {
            EncodableValue::Null
        } else {
            self.values.read_value(&mut reader)?
        };
        reader.expect_end()?;
        Ok(MethodCall { method, arguments })
    }

    fn encode_response(&self, response: &MethodResponse) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        match response {
            MethodResponse::Success(value) => {
                buf.push(ENVELOPE_SUCCESS);
                self.values.write_value(&mut buf, value)?;
            }
            MethodResponse::Error { code, message, details } => {
                buf.push(ENVELOPE_ERROR);
                self.values
                    .write_value(&mut buf, &EncodableValue::String(code.clone()))?;
                self.values
                    .write_value(&mut buf, &EncodableValue::from(message.clone()))?;
                self.values.write_value(&mut buf, details)?;
            }
            MethodResponse::NotImplemented => {}
        }
        Ok(buf)
    }

    fn decode_response(&self, bytes: &[u8]) -> Result<MethodResponse, CodecError> {
        if bytes.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }
        let mut reader = ByteReader::new(bytes);
        let response = match reader.read_u8()? {
            ENVELOPE_SUCCESS => MethodResponse::Success(self.values.read_value(&mut reader)?),
            ENVELOPE_ERROR => {
                let code = match self.values.read_value(&mut reader)? {
                    EncodableValue::String(code) => code,
                    other => {
                        return Err(CodecError::InvalidEnvelope(format!(
                            "error code must be a string, got {}",
                            other.type_name()
                        )));
                    }
                };
                let message = match self.values.read_value(&mut reader)? {
                    EncodableValue::String(message) => Some(message),
                    EncodableValue::Null => None,
                    other => {
                        return Err(CodecError::InvalidEnvelope(format!(
                            "error message must be a string or null, got {}",
                            other.type_name()
                        )));
                    }
                };
                let details = self.values.read_value(&mut reader)?;
                MethodResponse::Error { code, message, details }
            }
            marker => {
                return Err(CodecError::InvalidEnvelope(format!(
                    "unknown response marker {}",
                    marker
                )));
            }
        };
        reader.expect_end()?;
        Ok(response)
    }
}

//! # Bridge Core Codec Errors
//!
//! Errors raised while turning [`EncodableValue`](crate::codec::EncodableValue)s
//! and method envelopes into bytes and back.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unexpected end of message at offset {offset}: needed {needed} more byte(s)")]
    UnexpectedEnd { offset: usize, needed: usize },

    #[error("Unknown type tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    #[error("Unsupported type tag {tag} at offset {offset}")]
    UnsupportedTag { tag: u8, offset: usize },

    #[error("Invalid UTF-8 string at offset {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("{remaining} trailing byte(s) after decoded message")]
    TrailingBytes { remaining: usize },

    #[error("Collection of {0} elements is too large to encode")]
    SizeOverflow(usize),

    #[error("Collections nested too deeply at offset {offset}")]
    NestingTooDeep { offset: usize },

    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),
}

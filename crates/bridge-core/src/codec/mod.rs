//! # Bridge Core Codec
//!
//! Wire format shared by the host and the plugins.
//!
//! - **[`value`]**: [`EncodableValue`], the payload model every call argument and
//!   result is expressed in.
//! - **[`standard`]**: [`StandardMessageCodec`], the binary encoding of a single
//!   value (type tag, size prefix, little-endian body, element alignment).
//! - **[`method`]**: [`MethodCall`], [`MethodResponse`] and the
//!   [`StandardMethodCodec`] that frames them into call and reply envelopes.
//! - **[`error`]**: [`CodecError`](error::CodecError).
pub mod error;
pub mod method;
pub mod standard;
pub mod value;

pub use error::CodecError;
pub use method::{MethodCall, MethodCodec, MethodResponse, StandardMethodCodec};
pub use standard::StandardMessageCodec;
pub use value::EncodableValue;

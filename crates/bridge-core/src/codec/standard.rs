//! Binary encoding of a single [`EncodableValue`].
//!
//! Every value starts with a one-byte type tag. Variable length payloads carry
//! a size prefix: values below 254 fit in one byte, 254 announces a `u16` and
//! 255 a `u32`. Numeric data is little-endian; `float64` and the typed lists
//! are padded so their data starts at a multiple of the element width,
//! measured from the start of the message.
use byteorder::{ByteOrder, LittleEndian};

use crate::codec::error::CodecError;
use crate::codec::value::EncodableValue;

const TAG_NULL: u8 = 0;
const TAG_TRUE: u8 = 1;
const TAG_FALSE: u8 = 2;
const TAG_INT32: u8 = 3;
const TAG_INT64: u8 = 4;
const TAG_LARGE_INT: u8 = 5;
const TAG_FLOAT64: u8 = 6;
const TAG_STRING: u8 = 7;
const TAG_UINT8_LIST: u8 = 8;
const TAG_INT32_LIST: u8 = 9;
const TAG_INT64_LIST: u8 = 10;
const TAG_FLOAT64_LIST: u8 = 11;
const TAG_LIST: u8 = 12;
const TAG_MAP: u8 = 13;
const TAG_FLOAT32_LIST: u8 = 14;

const SIZE_U16_MARKER: u8 = 254;
const SIZE_U32_MARKER: u8 = 255;

/// Deepest list/map nesting accepted in either direction.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Stateless codec for the standard binary value format.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMessageCodec;

impl StandardMessageCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encodes one value into a fresh buffer.
    pub fn encode(&self, value: &EncodableValue) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.write_value(&mut buf, value)?;
        Ok(buf)
    }

    /// Decodes exactly one value; leftover bytes are an error.
    pub fn decode(&self, bytes: &[u8]) -> Result<EncodableValue, CodecError> {
        let mut reader = ByteReader::new(bytes);
        let value = self.read_value(&mut reader)?;
        reader.expect_end()?;
        Ok(value)
    }

    /// Appends the encoding of `value` to `buf`.
    pub fn write_value(&self, buf: &mut Vec<u8>, value: &EncodableValue) -> Result<(), CodecError> {
        self.write_nested(buf, value, 0)
    }

    fn write_nested(&self, buf: &mut Vec<u8>, value: &EncodableValue, depth: usize) -> Result<(), CodecError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(CodecError::NestingTooDeep { offset: buf.len() });
        }
        match value {
            EncodableValue::Null => buf.push(TAG_NULL),
            EncodableValue::Bool(true) => buf.push(TAG_TRUE),
            EncodableValue::Bool(false) => buf.push(TAG_FALSE),
            EncodableValue::I32(v) => {
                buf.push(TAG_INT32);
                let mut tmp = [0u8; 4];
                LittleEndian::write_i32(&mut tmp, *v);
                buf.extend_from_slice(&tmp);
            }
            EncodableValue::I64(v) => {
                buf.push(TAG_INT64);
                let mut tmp = [0u8; 8];
                LittleEndian::write_i64(&mut tmp, *v);
                buf.extend_from_slice(&tmp);
            }
            EncodableValue::F64(v) => {
                buf.push(TAG_FLOAT64);
                write_alignment(buf, 8);
                let mut tmp = [0u8; 8];
                LittleEndian::write_f64(&mut tmp, *v);
                buf.extend_from_slice(&tmp);
            }
            EncodableValue::String(s) => {
                buf.push(TAG_STRING);
                write_size(buf, s.len())?;
                buf.extend_from_slice(s.as_bytes());
            }
            EncodableValue::U8List(items) => {
                buf.push(TAG_UINT8_LIST);
                write_size(buf, items.len())?;
                buf.extend_from_slice(items);
            }
            EncodableValue::I32List(items) => {
                buf.push(TAG_INT32_LIST);
                write_size(buf, items.len())?;
                write_alignment(buf, 4);
                let start = buf.len();
                buf.resize(start + items.len() * 4, 0);
                LittleEndian::write_i32_into(items, &mut buf[start..]);
            }
            EncodableValue::I64List(items) => {
                buf.push(TAG_INT64_LIST);
                write_size(buf, items.len())?;
                write_alignment(buf, 8);
                let start = buf.len();
                buf.resize(start + items.len() * 8, 0);
                LittleEndian::write_i64_into(items, &mut buf[start..]);
            }
            EncodableValue::F32List(items) => {
                buf.push(TAG_FLOAT32_LIST);
                write_size(buf, items.len())?;
                write_alignment(buf, 4);
                let start = buf.len();
                buf.resize(start + items.len() * 4, 0);
                LittleEndian::write_f32_into(items, &mut buf[start..]);
            }
            EncodableValue::F64List(items) => {
                buf.push(TAG_FLOAT64_LIST);
                write_size(buf, items.len())?;
                write_alignment(buf, 8);
                let start = buf.len();
                buf.resize(start + items.len() * 8, 0);
                LittleEndian::write_f64_into(items, &mut buf[start..]);
            }
            EncodableValue::List(items) => {
                buf.push(TAG_LIST);
                write_size(buf, items.len())?;
                for item in items {
                    self.write_nested(buf, item, depth + 1)?;
                }
            }
            EncodableValue::Map(entries) => {
                buf.push(TAG_MAP);
                write_size(buf, entries.len())?;
                for (key, value) in entries {
                    self.write_nested(buf, key, depth + 1)?;
                    self.write_nested(buf, value, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Reads the next value from `reader`.
    pub fn read_value(&self, reader: &mut ByteReader<'_>) -> Result<EncodableValue, CodecError> {
        self.read_nested(reader, 0)
    }

    fn read_nested(&self, reader: &mut ByteReader<'_>, depth: usize) -> Result<EncodableValue, CodecError> {
        let tag_offset = reader.position();
        if depth > MAX_NESTING_DEPTH {
            return Err(CodecError::NestingTooDeep { offset: tag_offset });
        }
        let tag = reader.read_u8()?;
        let value = match tag {
            TAG_NULL => EncodableValue::Null,
            TAG_TRUE => EncodableValue::Bool(true),
            TAG_FALSE => EncodableValue::Bool(false),
            TAG_INT32 => EncodableValue::I32(LittleEndian::read_i32(reader.read_bytes(4)?)),
            TAG_INT64 => EncodableValue::I64(LittleEndian::read_i64(reader.read_bytes(8)?)),
            TAG_FLOAT64 => {
                reader.align(8)?;
                EncodableValue::F64(LittleEndian::read_f64(reader.read_bytes(8)?))
            }
            TAG_STRING => {
                let len = reader.read_size()?;
                let offset = reader.position();
                let bytes = reader.read_bytes(len)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|source| CodecError::InvalidUtf8 { offset, source })?;
                EncodableValue::String(s.to_string())
            }
            TAG_UINT8_LIST => {
                let len = reader.read_size()?;
                EncodableValue::U8List(reader.read_bytes(len)?.to_vec())
            }
            TAG_INT32_LIST => {
                let len = reader.read_size()?;
                reader.align(4)?;
                let bytes = reader.read_bytes(element_bytes(len, 4)?)?;
                let mut items = vec![0i32; len];
                LittleEndian::read_i32_into(bytes, &mut items);
                EncodableValue::I32List(items)
            }
            TAG_INT64_LIST => {
                let len = reader.read_size()?;
                reader.align(8)?;
                let bytes = reader.read_bytes(element_bytes(len, 8)?)?;
                let mut items = vec![0i64; len];
                LittleEndian::read_i64_into(bytes, &mut items);
                EncodableValue::I64List(items)
            }
            TAG_FLOAT32_LIST => {
                let len = reader.read_size()?;
                reader.align(4)?;
                let bytes = reader.read_bytes(element_bytes(len, 4)?)?;
                let mut items = vec![0f32; len];
                LittleEndian::read_f32_into(bytes, &mut items);
                EncodableValue::F32List(items)
            }
            TAG_FLOAT64_LIST => {
                let len = reader.read_size()?;
                reader.align(8)?;
                let bytes = reader.read_bytes(element_bytes(len, 8)?)?;
                let mut items = vec![0f64; len];
                LittleEndian::read_f64_into(bytes, &mut items);
                EncodableValue::F64List(items)
            }
            TAG_LIST => {
                let len = reader.read_size()?;
                let mut items = Vec::with_capacity(len.min(reader.remaining()));
                for _ in 0..len {
                    items.push(self.read_nested(reader, depth + 1)?);
                }
                EncodableValue::List(items)
            }
            TAG_MAP => {
                let len = reader.read_size()?;
                let mut entries = Vec::with_capacity(len.min(reader.remaining()));
                for _ in 0..len {
                    let key = self.read_nested(reader, depth + 1)?;
                    let value = self.read_nested(reader, depth + 1)?;
                    entries.push((key, value));
                }
                EncodableValue::Map(entries)
            }
            TAG_LARGE_INT => {
                return Err(CodecError::UnsupportedTag { tag, offset: tag_offset });
            }
            _ => return Err(CodecError::UnknownTag { tag, offset: tag_offset }),
        };
        Ok(value)
    }
}

/// Cursor over an encoded message.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < len {
            return Err(CodecError::UnexpectedEnd {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_size(&mut self) -> Result<usize, CodecError> {
        match self.read_u8()? {
            SIZE_U16_MARKER => Ok(usize::from(LittleEndian::read_u16(self.read_bytes(2)?))),
            SIZE_U32_MARKER => Ok(LittleEndian::read_u32(self.read_bytes(4)?) as usize),
            small => Ok(usize::from(small)),
        }
    }

    /// Skips padding up to the next multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) -> Result<(), CodecError> {
        let rem = self.pos % alignment;
        if rem != 0 {
            self.read_bytes(alignment - rem)?;
        }
        Ok(())
    }

    pub fn expect_end(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes { remaining }),
        }
    }
}

fn write_size(buf: &mut Vec<u8>, size: usize) -> Result<(), CodecError> {
    if size < usize::from(SIZE_U16_MARKER) {
        buf.push(size as u8);
    } else if let Ok(short) = u16::try_from(size) {
        buf.push(SIZE_U16_MARKER);
        let mut tmp = [0u8; 2];
        LittleEndian::write_u16(&mut tmp, short);
        buf.extend_from_slice(&tmp);
    } else {
        let long = u32::try_from(size).map_err(|_| CodecError::SizeOverflow(size))?;
        buf.push(SIZE_U32_MARKER);
        let mut tmp = [0u8; 4];
        LittleEndian::write_u32(&mut tmp, long);
        buf.extend_from_slice(&tmp);
    }
    Ok(())
}

fn write_alignment(buf: &mut Vec<u8>, alignment: usize) {
    let rem = buf.len() % alignment;
    if rem != 0 {
        buf.resize(buf.len() + (alignment - rem), 0);
    }
}

fn element_bytes(len: usize, width: usize) -> Result<usize, CodecError> {
    len.checked_mul(width).ok_or(CodecError::SizeOverflow(len))
}

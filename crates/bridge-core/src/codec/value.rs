use std::fmt;

use serde_json::{Map as JsonMap, Number, Value as JsonValue};

/// A value that can travel over a method channel.
///
/// Mirrors the types the standard codec knows how to encode. Maps keep their
/// insertion order and may use any value as key.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EncodableValue {
    #[default]
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    String(String),
    U8List(Vec<u8>),
    I32List(Vec<i32>),
    I64List(Vec<i64>),
    F32List(Vec<f32>),
    F64List(Vec<f64>),
    List(Vec<EncodableValue>),
    Map(Vec<(EncodableValue, EncodableValue)>),
}

impl EncodableValue {
    pub fn is_null(&self) -> bool {
        matches!(self, EncodableValue::Null)
    }

    /// Integer view of the value, widening `I32`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EncodableValue::I32(v) => Some(i64::from(*v)),
            EncodableValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EncodableValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up `key` in a map value.
    pub fn get(&self, key: &str) -> Option<&EncodableValue> {
        match self {
            EncodableValue::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Name of the variant, used in log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            EncodableValue::Null => "null",
            EncodableValue::Bool(_) => "bool",
            EncodableValue::I32(_) => "int32",
            EncodableValue::I64(_) => "int64",
            EncodableValue::F64(_) => "float64",
            EncodableValue::String(_) => "string",
            EncodableValue::U8List(_) => "uint8_list",
            EncodableValue::I32List(_) => "int32_list",
            EncodableValue::I64List(_) => "int64_list",
            EncodableValue::F32List(_) => "float32_list",
            EncodableValue::F64List(_) => "float64_list",
            EncodableValue::List(_) => "list",
            EncodableValue::Map(_) => "map",
        }
    }

    /// Converts to JSON for display. Non-string map keys are rendered as their
    /// JSON text; non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            EncodableValue::Null => JsonValue::Null,
            EncodableValue::Bool(b) => JsonValue::Bool(*b),
            EncodableValue::I32(v) => JsonValue::from(*v),
            EncodableValue::I64(v) => JsonValue::from(*v),
            EncodableValue::F64(v) => float_to_json(*v),
            EncodableValue::String(s) => JsonValue::String(s.clone()),
            EncodableValue::U8List(items) => items.iter().map(|v| JsonValue::from(*v)).collect(),
            EncodableValue::I32List(items) => items.iter().map(|v| JsonValue::from(*v)).collect(),
            EncodableValue::I64List(items) => items.iter().map(|v| JsonValue::from(*v)).collect(),
            EncodableValue::F32List(items) => items.iter().map(|v| float_to_json(f64::from(*v))).collect(),
            EncodableValue::F64List(items) => items.iter().map(|v| float_to_json(*v)).collect(),
            EncodableValue::List(items) => items.iter().map(EncodableValue::to_json).collect(),
            EncodableValue::Map(entries) => {
                let mut map = JsonMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = match key {
                        EncodableValue::String(s) => s.clone(),
                        other => other.to_json().to_string(),
                    };
                    map.insert(key, value.to_json());
                }
                JsonValue::Object(map)
            }
        }
    }
}

fn float_to_json(v: f64) -> JsonValue {
    Number::from_f64(v).map(JsonValue::Number).unwrap_or(JsonValue::Null)
}

impl fmt::Display for EncodableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for EncodableValue {
    fn from(v: bool) -> Self {
        EncodableValue::Bool(v)
    }
}

impl From<i32> for EncodableValue {
    fn from(v: i32) -> Self {
        EncodableValue::I32(v)
    }
}

impl From<i64> for EncodableValue {
    fn from(v: i64) -> Self {
        EncodableValue::I64(v)
    }
}

impl From<f64> for EncodableValue {
    fn from(v: f64) -> Self {
        EncodableValue::F64(v)
    }
}

impl From<&str> for EncodableValue {
    fn from(v: &str) -> Self {
        EncodableValue::String(v.to_string())
    }
}

impl From<String> for EncodableValue {
    fn from(v: String) -> Self {
        EncodableValue::String(v)
    }
}

impl From<Vec<u8>> for EncodableValue {
    fn from(v: Vec<u8>) -> Self {
        EncodableValue::U8List(v)
    }
}

impl From<Vec<EncodableValue>> for EncodableValue {
    fn from(v: Vec<EncodableValue>) -> Self {
        EncodableValue::List(v)
    }
}

impl<T: Into<EncodableValue>> From<Option<T>> for EncodableValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(EncodableValue::Null)
    }
}

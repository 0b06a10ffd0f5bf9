//! The tagged JSON tree produced by the JSON grammar.

use indexmap::IndexMap;

/// A parsed JSON value, still tagged with its lexical class.
///
/// Numbers keep their digit text. Objects keep key insertion order; a repeated key keeps its
/// first position and takes the last value. Object equality ignores order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    Number(String),
    String(String),
    Boolean(bool),
    Null,
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Build an object from a flat `[key, value, key, value, ...]` list as produced by the
    /// object rule. Keys are string values; anything else in a key slot is skipped along
    /// with its value.
    pub fn from_pairs(flat: Vec<JsonValue>) -> JsonValue {
        let mut object = IndexMap::with_capacity(flat.len() / 2);
        let mut items = flat.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            if let JsonValue::String(key) = key {
                object.insert(key, value);
            }
        }
        JsonValue::Object(object)
    }

    /// Name of the lexical class, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member lookup on objects.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }
}

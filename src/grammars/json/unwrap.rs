//! Conversion from the tagged tree to plain `serde_json` values.

use serde_json::{Map, Number, Value};

use super::value::JsonValue;

/// Strip the tags, turning digit text into numbers.
///
/// Numbers become `u64` when they fit and a finite `f64` otherwise. Digit runs too long
/// for either are kept as their text so that every tree has a native form.
pub fn unwrap_value(value: JsonValue) -> Value {
    match value {
        JsonValue::Number(digits) => native_number(digits),
        JsonValue::String(s) => Value::String(s),
        JsonValue::Boolean(b) => Value::Bool(b),
        JsonValue::Null => Value::Null,
        JsonValue::Array(items) => Value::Array(items.into_iter().map(unwrap_value).collect()),
        JsonValue::Object(members) => Value::Object(
            members
                .into_iter()
                .map(|(key, value)| (key, unwrap_value(value)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

fn native_number(digits: String) -> Value {
    if let Ok(n) = digits.parse::<u64>() {
        return Value::from(n);
    }
    match digits.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(digits),
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        unwrap_value(value)
    }
}

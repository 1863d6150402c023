//! Conversion between values and JSON.
//!
//! `to_json` produces only JSON-native representations, so values read
//! from the store can be handed to any structured-text serializer without
//! leaking driver types.

use super::Value;

use serde_json::{Map, Number, Value as Json};

impl Value {
    /// Converts the value to a JSON representation.
    ///
    /// Identifiers become hyphenated strings, blobs become `0x` hex strings
    /// and maps become objects keyed by the string form of each key.
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(*v),
            Value::I32(v) => Json::Number((*v).into()),
            Value::I64(v) => Json::Number((*v).into()),
            Value::F64(v) => Number::from_f64(*v).map(Json::Number).unwrap_or(Json::Null),
            Value::String(v) => Json::String(v.clone()),
            Value::Uuid(_) | Value::Bytes(_) => Json::String(self.to_string()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(key, value)| (json_key(key), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

fn json_key(key: &Value) -> String {
    match key {
        Value::String(key) => key.clone(),
        key => key.to_string(),
    }
}

impl From<Json> for Value {
    fn from(src: Json) -> Self {
        match src {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(v) => match v.as_i64() {
                Some(v) => Value::I64(v),
                None => Value::F64(v.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(v) => Value::String(v),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (Value::String(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Json> for Value {
    fn from(src: &Json) -> Self {
        Value::from(src.clone())
    }
}

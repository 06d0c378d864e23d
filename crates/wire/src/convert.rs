//! JSON Value Conversion Layer
//!
//! `ToJson` / `FromJson` map semantic types to and from a generic
//! `serde_json::Value`. Every value produced by `to_json` is accepted by
//! `from_json` of the same type.
//!
//! A mismatch raises a Decode error located at `FromJson<Type>`, carrying the
//! expected type name and a snippet of the offending value.

use serde_json::{Map, Number, Value};

use crate::error::{snippet, Error, Result};

pub trait ToJson {
    fn to_json(&self) -> Value;
}

pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self>;
}

pub fn to_json<T: ToJson + ?Sized>(value: &T) -> Value {
    value.to_json()
}

pub fn from_json<T: FromJson>(value: &Value) -> Result<T> {
    T::from_json(value)
}

/// JSON kind name used in mismatch messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode error for a value of the wrong JSON kind
pub fn type_mismatch(expected: &str, value: &Value) -> Error {
    Error::decode(
        format!("FromJson<{expected}>"),
        expected,
        format!("expected {expected}, got {}", kind_of(value)),
        snippet(value),
    )
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl FromJson for Value {
    fn from_json(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| type_mismatch("string", value))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| type_mismatch("boolean", value))
    }
}

macro_rules! signed_json {
    ($($ty:ty),+) => {$(
        impl ToJson for $ty {
            fn to_json(&self) -> Value {
                Value::Number(Number::from(*self))
            }
        }

        impl FromJson for $ty {
            fn from_json(value: &Value) -> Result<Self> {
                let wide = value
                    .as_i64()
                    .ok_or_else(|| type_mismatch(stringify!($ty), value))?;
                <$ty>::try_from(wide).map_err(|_| out_of_range(stringify!($ty), value))
            }
        }
    )+};
}

macro_rules! unsigned_json {
    ($($ty:ty),+) => {$(
        impl ToJson for $ty {
            fn to_json(&self) -> Value {
                Value::Number(Number::from(*self))
            }
        }

        impl FromJson for $ty {
            fn from_json(value: &Value) -> Result<Self> {
                let wide = value
                    .as_u64()
                    .ok_or_else(|| type_mismatch(stringify!($ty), value))?;
                <$ty>::try_from(wide).map_err(|_| out_of_range(stringify!($ty), value))
            }
        }
    )+};
}

signed_json!(i32, i64);
unsigned_json!(u16, u32, u64);

fn out_of_range(expected: &str, value: &Value) -> Error {
    Error::decode(
        format!("FromJson<{expected}>"),
        expected,
        "number out of range",
        snippet(value),
    )
}

impl ToJson for f64 {
    /// Non-finite numbers have no JSON form and map to null
    fn to_json(&self) -> Value {
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl FromJson for f64 {
    fn from_json(value: &Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| type_mismatch("number", value))
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(inner) => inner.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| type_mismatch("array", value))?;
        items.iter().map(T::from_json).collect()
    }
}

impl ToJson for Map<String, Value> {
    fn to_json(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl FromJson for Map<String, Value> {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| type_mismatch("object", value))
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

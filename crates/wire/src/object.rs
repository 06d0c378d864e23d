//! Ordered key/value property bag
//!
//! Keys keep insertion order; setting an existing key replaces its value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::convert::{type_mismatch, FromJson, ToJson};
use crate::error::{Context, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Typed lookup; absent keys and explicit nulls are both `None`
    pub fn get<T: FromJson>(&self, key: &str) -> Result<Option<T>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_json(value)
                .map(Some)
                .with_context(|| format!("JsonObject::get({key})")),
        }
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set<T: ToJson + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> &mut Self {
        self.0.insert(key.into(), value.to_json());
        self
    }

    /// Builder form of [`JsonObject::set`]
    pub fn with<T: ToJson + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        self.set(key, value);
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for JsonObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<JsonObject> for Value {
    fn from(object: JsonObject) -> Self {
        Value::Object(object.0)
    }
}

impl ToJson for JsonObject {
    fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl FromJson for JsonObject {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_object()
            .cloned()
            .map(Self)
            .ok_or_else(|| type_mismatch("object", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_has() {
        let mut bag = JsonObject::new();
        bag.set("name", "firefox").set("count", &3u32);

        assert!(bag.has("name"));
        assert!(!bag.has("missing"));
        assert_eq!(bag.get::<String>("name").unwrap().as_deref(), Some("firefox"));
        assert_eq!(bag.get::<u32>("count").unwrap(), Some(3));
        assert_eq!(bag.get::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn test_last_write_wins_and_order_kept() {
        let bag = JsonObject::new()
            .with("b", &1i64)
            .with("a", &2i64)
            .with("b", &3i64);

        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(bag.get::<i64>("b").unwrap(), Some(3));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_null_reads_as_absent() {
        let bag = JsonObject::from_json(&json!({"k": null})).unwrap();
        assert!(bag.has("k"));
        assert_eq!(bag.get::<String>("k").unwrap(), None);
    }

    #[test]
    fn test_typed_get_mismatch_adds_frame() {
        let bag = JsonObject::new().with("k", &true);
        let err = bag.get::<String>("k").unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.locations(), vec!["FromJson<string>", "JsonObject::get(k)"]);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut bag = JsonObject::new()
            .with("a", &1i64)
            .with("b", &2i64)
            .with("c", &3i64);
        assert_eq!(bag.remove("b"), Some(json!(2)));
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(JsonObject::from_json(&json!("nope")).unwrap_err().is_decode());
        let value = json!({"x": [1, 2]});
        assert_eq!(JsonObject::from_json(&value).unwrap().to_json(), value);
    }
}

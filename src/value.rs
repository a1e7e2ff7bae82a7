//! The plain data tree that lenses read and rebuild.
//!
//! A [`Value`] is a JSON-shaped sum type. Containers and strings sit behind
//! [`Arc`], so cloning a value never copies nested data: two trees that
//! differ only along one path share every untouched branch.
//!
//! [`Value::Null`] doubles as the "nothing here" value. A missing key or an
//! out-of-range index reads as `Null`. The fallback lenses treat `Null` and
//! the other falsy scalars (see [`Value::is_falsy`]) as an absent container.
//!
//! # Examples
//!
//! ```
//! use pathlens::Value;
//! use serde_json::json;
//!
//! let state = Value::from(json!({ "list": { "items": [{ "name": "First" }] } }));
//! assert_eq!(state["list"]["items"][0]["name"], Value::from("First"));
//! assert!(state["list"]["missing"].is_null());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::num::FpCategory;
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The element storage of [`Value::Array`].
pub type Array = Vec<Value>;

/// The entry storage of [`Value::Object`].
pub type Object = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

/// A node of the data tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent or explicitly empty.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A JSON number.
    Number(serde_json::Number),
    /// A shared string.
    String(Arc<str>),
    /// A shared array.
    Array(Arc<Array>),
    /// A shared object.
    Object(Arc<Object>),
}

/// The runtime kind of a [`Value`], used in shape checks and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        formatter.write_str(name)
    }
}

impl Value {
    /// Creates an empty object.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(Arc::new(Object::new()))
    }

    /// Creates an empty array.
    #[must_use]
    pub fn empty_array() -> Self {
        Self::Array(Arc::new(Array::new()))
    }

    /// Builds an object from key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathlens::Value;
    ///
    /// let item = Value::object([("name", Value::from("First"))]);
    /// assert_eq!(item["name"], Value::from("First"));
    /// ```
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Object(Arc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for the values a container lens treats as absent:
    /// `Null`, `false`, zero and the empty string.
    ///
    /// Empty arrays and objects are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathlens::Value;
    ///
    /// assert!(Value::from(false).is_falsy());
    /// assert!(Value::from(0.0).is_falsy());
    /// assert!(!Value::empty_array().is_falsy());
    /// ```
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null | Self::Bool(false) => true,
            Self::Number(number) => number
                .as_f64()
                .is_some_and(|value| value.classify() == FpCategory::Zero),
            Self::String(text) => text.is_empty(),
            Self::Bool(true) | Self::Array(_) | Self::Object(_) => false,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(&**items),
            _ => None,
        }
    }

    /// Returns the entries if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(entries) => Some(&**entries),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(&**text),
            _ => None,
        }
    }

    /// Returns the boolean if this is a bool.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the number as `i64` when it fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as `u64` when it fits.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            _ => None,
        }
    }

    /// Returns the number as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|entries| entries.get(key))
    }

    /// Looks up `index` if this is an array.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Returns `true` when both values are containers backed by the same allocation.
    ///
    /// Scalars never share, so this is `false` for them.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathlens::Value;
    ///
    /// let items = Value::from(vec![Value::from(1), Value::from(2)]);
    /// let alias = items.clone();
    /// assert!(items.ptr_eq(&alias));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(left), Self::Array(right)) => Arc::ptr_eq(left, right),
            (Self::Object(left), Self::Object(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl Index<&str> for Value {
    type Output = Self;

    fn index(&self, key: &str) -> &Self::Output {
        self.get_key(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Self;

    fn index(&self, index: usize) -> &Self::Output {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        formatter.write_str(&text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(number.into())
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Self::Number(number.into())
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::Number(number.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become [`Value::Null`].
    fn from(number: f64) -> Self {
        serde_json::Number::from_f64(number).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Self::Array(Arc::new(items))
    }
}

impl From<Object> for Value {
    fn from(entries: Object) -> Self {
        Self::Object(Arc::new(entries))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Array(Arc::new(iter.into_iter().collect()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::from(text),
            serde_json::Value::Array(items) => items.into_iter().map(Self::from).collect(),
            serde_json::Value::Object(entries) => Self::object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value))),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => Self::Number(number.clone()),
            Value::String(text) => Self::String(text.to_string()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => number.serialize(serializer),
            Self::String(text) => serializer.serialize_str(text),
            Self::Array(items) => serializer.collect_seq(items.iter()),
            Self::Object(entries) => serializer.collect_map(entries.iter()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_lookups_read_as_null() {
        let value = Value::from(json!({ "items": [1, 2] }));
        assert!(value["missing"].is_null());
        assert!(value["items"][5].is_null());
        assert!(value["items"]["name"].is_null());
    }

    #[test]
    fn test_kind_reports_variant() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(Value::from("a").kind(), ValueKind::String);
        assert_eq!(Value::empty_array().kind(), ValueKind::Array);
        assert_eq!(Value::empty_object().kind(), ValueKind::Object);
    }

    #[test]
    fn test_json_conversion_is_lossless() {
        let json = json!({ "a": [1, 2.5, "x", null, true], "b": { "c": {} } });
        let value = Value::from(json.clone());
        assert_eq!(serde_json::Value::from(&value), json);
    }

    #[test]
    fn test_clone_shares_containers() {
        let value = Value::from(json!({ "a": [1] }));
        let copy = value.clone();
        assert!(value.ptr_eq(&copy));
        assert!(value["a"].ptr_eq(&copy["a"]));
    }

    #[test]
    fn test_is_falsy() {
        for falsy in [
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(-0.0),
            Value::from(""),
        ] {
            assert!(falsy.is_falsy(), "{falsy:?}");
        }
        for truthy in [
            Value::from(true),
            Value::from(-1),
            Value::from("0"),
            Value::empty_array(),
            Value::empty_object(),
        ] {
            assert!(!truthy.is_falsy(), "{truthy:?}");
        }
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert!(Value::from(f64::NAN).is_null());
    }

    #[test]
    fn test_display_is_compact_json() {
        let value = Value::from(json!({ "a": [1, "x"] }));
        assert_eq!(value.to_string(), r#"{"a":[1,"x"]}"#);
    }

    #[test]
    fn test_serde_round_trip() {
        let value = Value::from(json!({ "list": { "items": [{ "name": "A" }] } }));
        let text = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }
}

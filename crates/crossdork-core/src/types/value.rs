use super::Field;
use crate::{QueryError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A single primitive field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Free text
    Text(String),
    /// JSON number, kept in its original representation
    Number(Number),
    /// Boolean flag
    Bool(bool),
}

impl Scalar {
    /// Convert a JSON primitive. Returns `None` for null, arrays and objects.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The value as it should appear inside a query, trimmed.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Empty or whitespace-only text counts as absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Interpret the value as a flag.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            ),
        }
    }

    /// Convert back to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Bool(b) => Value::Bool(*b),
        }
    }

    /// Parse a command-line style token: integers and booleans become typed
    /// values, anything else stays text.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::Number(n.into());
        }
        match trimmed {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Self::Number(n.into())
                }
            }
        )*
    };
}

scalar_from_int!(u16, u32, u64, i32, i64);

/// A field value: one primitive or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Single value
    One(Scalar),
    /// Ordered list of values for the same field
    Many(Vec<Scalar>),
}

impl FieldValue {
    /// Convert a JSON value. Arrays keep only their primitive elements;
    /// anything that is not a primitive or an array yields `None`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Many(items.iter().filter_map(Scalar::from_json).collect())),
            other => Scalar::from_json(other).map(Self::One),
        }
    }

    /// Normalize to an ordered list of rendered, non-empty values.
    ///
    /// This is the single place where the scalar/array distinction is
    /// erased; clause builders only ever see the list.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.scalars()
            .filter(|s| !s.is_empty())
            .map(Scalar::render)
            .collect()
    }

    /// Iterate over the raw scalars.
    pub fn scalars(&self) -> impl Iterator<Item = &Scalar> {
        match self {
            Self::One(s) => std::slice::from_ref(s).iter(),
            Self::Many(items) => items.iter(),
        }
    }

    /// True when no usable value remains after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars().all(Scalar::is_empty)
    }

    /// Append a value, promoting a single value to a list.
    pub fn push(&mut self, value: Scalar) {
        match self {
            Self::One(existing) => {
                let first = existing.clone();
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(items) => items.push(value),
        }
    }

    /// Convert back to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::One(s) => s.to_json(),
            Self::Many(items) => Value::Array(items.iter().map(Scalar::to_json).collect()),
        }
    }
}

macro_rules! field_value_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    Self::One(value.into())
                }
            }
        )*
    };
}

field_value_from!(Scalar, &str, String, bool, u16, u32, u64, i32, i64);

impl<T: Into<Scalar>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Into<Scalar>> FromIterator<T> for FieldValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().map(Into::into).collect())
    }
}

/// Mapping from field name to value: the input of every converter.
///
/// Keys are kept as strings so unknown keys survive a share-code round trip;
/// converters only look up the names in [`Field::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedFields(BTreeMap<String, FieldValue>);

impl NormalizedFields {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.0.insert(field.name().to_string(), value.into());
    }

    /// Append a value under a raw key, turning repeated keys into a list.
    pub fn push(&mut self, key: impl Into<String>, value: Scalar) {
        match self.0.entry(key.into()) {
            std::collections::btree_map::Entry::Occupied(mut e) => e.get_mut().push(value),
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(FieldValue::One(value));
            }
        }
    }

    /// Raw access by field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.0.get(field.name())
    }

    /// Normalized values for a field; empty when absent.
    #[must_use]
    pub fn values(&self, field: Field) -> Vec<String> {
        self.get(field).map(FieldValue::values).unwrap_or_default()
    }

    /// True when the field is present with at least one usable value.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some_and(|v| !v.is_empty())
    }

    /// Recognized fields with usable values, in declaration order.
    #[must_use]
    pub fn present(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.has(*f)).collect()
    }

    /// Number of raw entries, including unknown keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no raw entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over raw entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build from a JSON object. Unusable values are dropped; only a
    /// non-object input is an error.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(QueryError::InvalidFields(format!(
                "expected an object, got {}",
                json_kind(value)
            )));
        };
        Ok(Self::from_map(map))
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self(
            map.iter()
                .filter_map(|(k, v)| FieldValue::from_json(v).map(|fv| (k.clone(), fv)))
                .collect(),
        )
    }

    /// Convert to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}

impl<'de> Deserialize<'de> for NormalizedFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl FromIterator<(Field, FieldValue)> for NormalizedFields {
    fn from_iter<I: IntoIterator<Item = (Field, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(f, v)| (f.name().to_string(), v)).collect())
    }
}

/// Human-readable JSON type name for error messages.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_wrapped_in_list() {
        let v = FieldValue::from("example.com");
        assert_eq!(v.values(), vec!["example.com"]);
    }

    #[test]
    fn test_values_skip_empty_and_trim() {
        let v: FieldValue = ["  a ", "", "   ", "b"].into_iter().collect();
        assert_eq!(v.values(), vec!["a", "b"]);
        let empty: FieldValue = ["", " "].into_iter().collect();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_numbers_render_without_quotes() {
        let v: FieldValue = [80u16, 443].into_iter().collect();
        assert_eq!(v.values(), vec!["80", "443"]);
    }

    #[test]
    fn test_from_json_is_lenient() {
        let fields = NormalizedFields::from_json(&json!({
            "ip": "1.1.1.1",
            "port": [80, null, {"x": 1}, 443],
            "org": null,
            "city": {"nested": true},
            "custom": "kept"
        }))
        .unwrap();

        assert_eq!(fields.values(Field::Ip), vec!["1.1.1.1"]);
        assert_eq!(fields.values(Field::Port), vec!["80", "443"]);
        assert!(!fields.has(Field::Org));
        assert!(!fields.has(Field::City));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = NormalizedFields::from_json(&json!(["ip"])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_present_follows_declaration_order() {
        let fields = NormalizedFields::new()
            .with(Field::City, "Berlin")
            .with(Field::Ip, "1.2.3.4")
            .with(Field::Org, "");
        assert_eq!(fields.present(), vec![Field::Ip, Field::City]);
    }

    #[test]
    fn test_push_promotes_to_list() {
        let mut fields = NormalizedFields::new();
        fields.push("port", Scalar::parse_loose("80"));
        fields.push("port", Scalar::parse_loose("443"));
        assert_eq!(fields.get(Field::Port).unwrap().to_json(), json!([80, 443]));
    }

    #[test]
    fn test_truthiness() {
        assert!(Scalar::Bool(true).is_truthy());
        assert!(Scalar::from("yes").is_truthy());
        assert!(Scalar::from(1u16).is_truthy());
        assert!(!Scalar::from("false").is_truthy());
        assert!(!Scalar::from(0u16).is_truthy());
    }

    #[test]
    fn test_deserialize_and_serialize() {
        let fields: NormalizedFields =
            serde_json::from_str(r#"{"asn":"AS13335","port":[80,443],"expiredCert":true}"#).unwrap();
        assert_eq!(fields.values(Field::Asn), vec!["AS13335"]);
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({"asn": "AS13335", "expiredCert": true, "port": [80, 443]})
        );
    }
}

//! Dynamic name/value fields exchanged with the remote API.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::names::names_match;

/// One entry of an API resource's field list.
///
/// Extra keys the API attaches to a field (labels, help text, ordering hints)
/// are ignored during deserialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Wire name of the field.
    pub name: String,
    /// Loosely typed value; `null` when the field carries nothing.
    #[serde(default)]
    pub value: Value,
}

impl Field {
    /// Build a field from a wire name and any JSON-convertible value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build a field carrying `null`.
    #[must_use]
    pub fn null(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Null,
        }
    }

    /// Whether the wire value is `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

/// Locate a field by wire name, ignoring case.
#[must_use]
pub fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|field| names_match(&field.name, name))
}

/// Value kind and shape a classified attribute carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Scalar boolean.
    Bool,
    /// Scalar 64-bit integer.
    Int,
    /// Scalar 64-bit float.
    Float,
    /// Scalar string.
    String,
    /// Set of strings.
    StringSet,
    /// Set of 64-bit integers.
    IntSet,
}

impl FieldKind {
    /// Bucket order used when emitting and routing fields.
    pub const ORDER: [Self; 6] = [
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::String,
        Self::StringSet,
        Self::IntSet,
    ];

    /// Render the kind as its canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::StringSet => "string_set",
            Self::IntSet => "int_set",
        }
    }

    /// Whether the kind is a set shape.
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::StringSet | Self::IntSet)
    }
}

impl Display for FieldKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Name of the JSON type held by `value`, for diagnostics.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
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
    fn deserialises_api_payload_ignoring_metadata() {
        let payload = json!([
            { "order": 0, "name": "host", "label": "Host", "value": "localhost" },
            { "order": 1, "name": "useSsl", "value": true },
            { "order": 2, "name": "category", "helpText": "optional" }
        ]);
        let fields: Vec<Field> = serde_json::from_value(payload).expect("fields should parse");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], Field::new("host", "localhost"));
        assert_eq!(fields[1].value, Value::Bool(true));
        assert!(fields[2].is_null());
    }

    #[test]
    fn find_field_ignores_case() {
        let fields = vec![Field::new("baseUrl", "/api"), Field::null("port")];
        let found = find_field(&fields, "BASEURL").expect("field should match");
        assert_eq!(found.value, json!("/api"));
        assert!(find_field(&fields, "missing").is_none());
    }

    #[test]
    fn kind_order_lists_scalars_before_sets() {
        let sets: Vec<bool> = FieldKind::ORDER.iter().map(|kind| kind.is_set()).collect();
        assert_eq!(sets, vec![false, false, false, false, true, true]);
        assert_eq!(FieldKind::StringSet.to_string(), "string_set");
    }

    #[test]
    fn json_type_names_cover_all_variants() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!({"a": 1})), "object");
    }
}

//! Wire value coercion into typed representations.
//!
//! The API carries every number as a float, so integer coercion accepts floats
//! and truncates toward zero.

#![allow(clippy::redundant_pub_crate)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{FieldError, FieldResult};
use crate::field::{FieldKind, json_type_name};

/// How malformed wire values are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Fall back to the kind's zero value and log a warning.
    #[default]
    Lenient,
    /// Reject the field with `FieldError::FieldTypeMismatch`.
    Strict,
}

pub(crate) fn to_bool(policy: CoercionPolicy, field: &str, value: &Value) -> FieldResult<bool> {
    value
        .as_bool()
        .map_or_else(|| degrade(policy, field, FieldKind::Bool, value), Ok)
}

pub(crate) fn to_int(policy: CoercionPolicy, field: &str, value: &Value) -> FieldResult<i64> {
    as_int(value).map_or_else(|| degrade(policy, field, FieldKind::Int, value), Ok)
}

pub(crate) fn to_float(policy: CoercionPolicy, field: &str, value: &Value) -> FieldResult<f64> {
    value
        .as_f64()
        .map_or_else(|| degrade(policy, field, FieldKind::Float, value), Ok)
}

pub(crate) fn to_string(policy: CoercionPolicy, field: &str, value: &Value) -> FieldResult<String> {
    value.as_str().map_or_else(
        || degrade(policy, field, FieldKind::String, value),
        |text| Ok(text.to_string()),
    )
}

pub(crate) fn to_string_list(
    policy: CoercionPolicy,
    field: &str,
    value: &Value,
) -> FieldResult<Vec<String>> {
    let Some(items) = value.as_array() else {
        return degrade(policy, field, FieldKind::StringSet, value);
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map_or_else(
                || degrade(policy, field, FieldKind::StringSet, item),
                |text| Ok(text.to_string()),
            )
        })
        .collect()
}

pub(crate) fn to_int_list(
    policy: CoercionPolicy,
    field: &str,
    value: &Value,
) -> FieldResult<Vec<i64>> {
    let Some(items) = value.as_array() else {
        return degrade(policy, field, FieldKind::IntSet, value);
    };
    items
        .iter()
        .map(|item| as_int(item).map_or_else(|| degrade(policy, field, FieldKind::IntSet, item), Ok))
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn as_int(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|number| number.trunc() as i64))
}

fn degrade<T: Default>(
    policy: CoercionPolicy,
    field: &str,
    expected: FieldKind,
    value: &Value,
) -> FieldResult<T> {
    let found = json_type_name(value);
    match policy {
        CoercionPolicy::Lenient => {
            warn!(field, %expected, found, "wire value has unexpected type; using zero value");
            Ok(T::default())
        }
        CoercionPolicy::Strict => Err(FieldError::FieldTypeMismatch {
            field: field.to_string(),
            expected,
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_accepts_float_and_truncates() {
        let lenient = CoercionPolicy::Lenient;
        assert_eq!(to_int(lenient, "port", &json!(8080.0)), Ok(8080));
        assert_eq!(to_int(lenient, "port", &json!(12.9)), Ok(12));
        assert_eq!(to_int(lenient, "port", &json!(-3.7)), Ok(-3));
        assert_eq!(to_int(lenient, "port", &json!(42)), Ok(42));
    }

    #[test]
    fn lenient_mismatch_yields_zero_values() {
        let lenient = CoercionPolicy::Lenient;
        assert_eq!(to_int(lenient, "port", &json!("8080")), Ok(0));
        assert_eq!(to_bool(lenient, "useSsl", &json!(1)), Ok(false));
        assert_eq!(to_string(lenient, "host", &json!(true)), Ok(String::new()));
        assert_eq!(to_float(lenient, "ratio", &json!([])), Ok(0.0));
        assert_eq!(to_int_list(lenient, "tagIds", &json!("1,2")), Ok(Vec::new()));
        assert_eq!(
            to_string_list(lenient, "categories", &json!(["tv", 5])),
            Ok(vec!["tv".to_string(), String::new()])
        );
    }

    #[test]
    fn strict_mismatch_reports_types() {
        let err = to_int(CoercionPolicy::Strict, "port", &json!("8080")).unwrap_err();
        assert_eq!(
            err,
            FieldError::FieldTypeMismatch {
                field: "port".to_string(),
                expected: FieldKind::Int,
                found: "string",
            }
        );
        let err = to_int_list(CoercionPolicy::Strict, "tagIds", &json!([1.0, "x"])).unwrap_err();
        assert!(matches!(
            err,
            FieldError::FieldTypeMismatch {
                expected: FieldKind::IntSet,
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn lists_coerce_elements() {
        let lenient = CoercionPolicy::Lenient;
        assert_eq!(to_int_list(lenient, "tagIds", &json!([1.0, 2.0])), Ok(vec![1, 2]));
        assert_eq!(
            to_string_list(lenient, "categories", &json!(["a", "b"])),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
    }
}

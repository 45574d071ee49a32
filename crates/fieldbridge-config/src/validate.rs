//! Validation helpers for catalog documents.

use std::collections::HashSet;

use fieldbridge_core::{ExceptionEntry, FieldClassification};

use crate::error::{ConfigError, ConfigResult};

/// Check an exception table for blank and repeated names.
///
/// # Errors
///
/// Returns `ConfigError::InvalidField` for blank names and
/// `ConfigError::DuplicateField` when a wire or typed name repeats.
pub fn validate_exceptions(entries: &[ExceptionEntry]) -> ConfigResult<()> {
    let mut wire_names = HashSet::new();
    let mut typed_names = HashSet::new();
    for entry in entries {
        ensure_named("exceptions", "wireName", &entry.wire_name)?;
        ensure_named("exceptions", "typedName", &entry.typed_name)?;
        if !wire_names.insert(entry.wire_name.as_str()) {
            return Err(ConfigError::DuplicateField {
                section: "exceptions".to_string(),
                field: entry.wire_name.clone(),
            });
        }
        if !typed_names.insert(entry.typed_name.as_str()) {
            return Err(ConfigError::DuplicateField {
                section: "exceptions".to_string(),
                field: entry.typed_name.clone(),
            });
        }
    }
    Ok(())
}

/// Check one resource classification.
///
/// # Errors
///
/// Returns `ConfigError::InvalidField` for a blank resource type and
/// `ConfigError::Classification` when the table breaks its invariants.
pub fn validate_resource(resource: &str, classification: &FieldClassification) -> ConfigResult<()> {
    ensure_named("resources", "<key>", resource)?;
    classification
        .validate()
        .map_err(|source| ConfigError::Classification {
            resource: resource.to_string(),
            source,
        })
}

fn ensure_named(section: &str, field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            section: section.to_string(),
            field: field.to_string(),
            message: "must not be blank".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldbridge_core::{FieldError, FieldKind};

    #[test]
    fn exceptions_reject_repeated_wire_names() {
        let entries = vec![
            ExceptionEntry::new("tags", "fieldTags"),
            ExceptionEntry::new("tags", "labels"),
        ];
        let err = validate_exceptions(&entries).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateField { ref field, .. } if field == "tags"
        ));
    }

    #[test]
    fn exceptions_reject_blank_names() {
        let entries = vec![ExceptionEntry::new("seedCriteria.seedTime", " ")];
        let err = validate_exceptions(&entries).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField { ref field, .. } if field == "typedName"
        ));
    }

    #[test]
    fn resource_errors_carry_resource_name() {
        let classification = FieldClassification::new()
            .with_bucket(FieldKind::Int, ["port"])
            .with_bucket(FieldKind::Float, ["port"]);
        let err = validate_resource("indexer_torznab", &classification).unwrap_err();
        match err {
            ConfigError::Classification { resource, source } => {
                assert_eq!(resource, "indexer_torznab");
                assert!(matches!(source, FieldError::DuplicateClassification { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_resource_type_is_rejected() {
        let err = validate_resource("", &FieldClassification::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { .. }));
    }
}

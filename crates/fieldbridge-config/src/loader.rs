//! Catalog parsing and the compiled per-resource mapper table.
//!
//! # Design
//! - Documents are validated fully before any mapper is compiled.
//! - The compiled `Catalog` is immutable and can be shared across threads.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use fieldbridge_core::{FieldMapper, MarshalOptions, NameTranslator};
use tracing::{debug, info, instrument};

use crate::defaults::default_exceptions;
use crate::error::{ConfigError, ConfigResult};
use crate::model::CatalogDocument;
use crate::validate::{validate_exceptions, validate_resource};

/// Compiled mappers keyed by resource type.
#[derive(Debug, Clone)]
pub struct Catalog {
    translator: NameTranslator,
    options: MarshalOptions,
    mappers: BTreeMap<String, FieldMapper>,
}

impl Catalog {
    /// Validate `document` and compile a mapper for each resource type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the exception table or any classification is invalid.
    pub fn from_document(document: CatalogDocument) -> ConfigResult<Self> {
        let exceptions = document.exceptions.unwrap_or_else(default_exceptions);
        validate_exceptions(&exceptions)?;
        for (resource, classification) in &document.resources {
            validate_resource(resource, classification)?;
        }

        let translator = NameTranslator::new(exceptions);
        let mut mappers = BTreeMap::new();
        for (resource, classification) in document.resources {
            let mapper = FieldMapper::new(&classification, translator.clone())
                .map_err(|source| ConfigError::Classification {
                    resource: resource.clone(),
                    source,
                })?
                .with_options(document.options);
            debug!(resource = %resource, "compiled field mapper");
            mappers.insert(resource, mapper);
        }

        Ok(Self {
            translator,
            options: document.options,
            mappers,
        })
    }

    /// Mapper registered for `resource`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownResource` when no classification was loaded for it.
    pub fn mapper(&self, resource: &str) -> ConfigResult<&FieldMapper> {
        self.mappers
            .get(resource)
            .ok_or_else(|| ConfigError::UnknownResource {
                resource: resource.to_string(),
            })
    }

    /// Resource types in sorted order.
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(String::as_str)
    }

    /// Number of registered resource types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Whether no resource types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Exception table shared by every mapper.
    #[must_use]
    pub const fn translator(&self) -> &NameTranslator {
        &self.translator
    }

    /// Options applied to every mapper.
    #[must_use]
    pub const fn options(&self) -> MarshalOptions {
        self.options
    }
}

/// Parse and compile a catalog from a JSON string.
///
/// # Errors
///
/// Returns `ConfigError::Parse` for malformed JSON or unknown keys, and the
/// validation errors of [`Catalog::from_document`].
pub fn load_catalog_str(raw: &str) -> ConfigResult<Catalog> {
    let document: CatalogDocument =
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
    let catalog = Catalog::from_document(document)?;
    info!(resources = catalog.len(), "loaded field catalog");
    Ok(catalog)
}

/// Read, parse, and compile a catalog file.
///
/// # Errors
///
/// Returns `ConfigError::Io` when the file cannot be read, plus the errors of
/// [`load_catalog_str`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_catalog_file(path: &Path) -> ConfigResult<Catalog> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "catalog.read",
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldbridge_core::{CoercionPolicy, FieldKind};

    #[test]
    fn missing_exceptions_fall_back_to_defaults() {
        let catalog = load_catalog_str(r#"{ "resources": { "indexer": { "ints": ["priority"] } } }"#)
            .expect("catalog should load");
        assert_eq!(catalog.translator().exceptions(), default_exceptions().as_slice());
        assert_eq!(catalog.options(), MarshalOptions::default());
    }

    #[test]
    fn explicit_exceptions_replace_defaults() {
        let catalog = load_catalog_str(
            r#"{
                "exceptions": [{ "wireName": "meta.rank", "typedName": "rank" }],
                "options": { "coercion": "strict" },
                "resources": { "indexer": { "intsExceptions": ["rank"] } }
            }"#,
        )
        .expect("catalog should load");
        assert_eq!(catalog.translator().to_typed_name("meta.rank"), "rank");
        assert_eq!(catalog.translator().to_typed_name("tags"), "tags");
        let mapper = catalog.mapper("indexer").expect("indexer should exist");
        assert_eq!(mapper.options().coercion, CoercionPolicy::Strict);
        assert_eq!(mapper.route_kind("rank"), Some(FieldKind::Int));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_catalog_str(r#"{ "resources": { "indexer": { "integers": ["port"] } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_resource_lookup_fails() {
        let catalog = load_catalog_str("{}").expect("empty catalog should load");
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.mapper("indexer"),
            Err(ConfigError::UnknownResource { .. })
        ));
    }
}

//! Two-way marshaling between typed containers and API field lists.
//!
//! # Design
//! - A classification is compiled once into an ordered route table
//!   (`{kind, names}`); routing and emission walk the table in kind order.
//! - Outbound skips null and unknown attributes; inbound writes null for
//!   `null` wire values and never lets a server echo replace a sensitive value.
//! - Empty inbound lists leave set attributes untouched unless
//!   `EmptySetPolicy::Clear` is selected, since the API cannot distinguish an
//!   empty list from an omitted one.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::{debug, trace};

use crate::classification::FieldClassification;
use crate::coerce::{self, CoercionPolicy};
use crate::container::{Attribute, FieldContainer, TypedValue, get_attribute, get_attribute_mut};
use crate::error::{FieldError, FieldResult};
use crate::field::{Field, FieldKind};
use crate::names::{NameTranslator, names_match};
use crate::value::{AttrValue, IntSet, StringSet};

/// Handling of empty inbound lists routed to set attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySetPolicy {
    /// Leave the attribute as it was.
    #[default]
    Preserve,
    /// Write an empty set.
    Clear,
}

/// Tunables applied by a [`FieldMapper`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MarshalOptions {
    /// Handling of wire values with the wrong JSON type.
    pub coercion: CoercionPolicy,
    /// Handling of empty inbound lists for set attributes.
    pub empty_sets: EmptySetPolicy,
}

#[derive(Debug, Clone)]
struct Route {
    kind: FieldKind,
    names: Vec<String>,
}

impl Route {
    fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| names_match(candidate, name))
    }
}

/// Compiled marshaling engine for one resource type.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    routes: Vec<Route>,
    sensitive: Vec<String>,
    translator: NameTranslator,
    options: MarshalOptions,
}

impl FieldMapper {
    /// Compile `classification` against `translator`.
    ///
    /// # Errors
    ///
    /// Returns the classification's validation error when its invariants do not hold.
    pub fn new(classification: &FieldClassification, translator: NameTranslator) -> FieldResult<Self> {
        classification.validate()?;
        let routes = FieldKind::ORDER
            .into_iter()
            .map(|kind| Route {
                kind,
                names: classification
                    .names(kind)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .filter(|route| !route.names.is_empty())
            .collect();

        Ok(Self {
            routes,
            sensitive: classification.sensitive.clone(),
            translator,
            options: MarshalOptions::default(),
        })
    }

    /// Replace the marshaling options.
    #[must_use]
    pub fn with_options(mut self, options: MarshalOptions) -> Self {
        self.options = options;
        self
    }

    /// Options currently in effect.
    #[must_use]
    pub const fn options(&self) -> MarshalOptions {
        self.options
    }

    /// Name translator used by this mapper.
    #[must_use]
    pub const fn translator(&self) -> &NameTranslator {
        &self.translator
    }

    /// Kind routed for a typed name, if classified.
    #[must_use]
    pub fn route_kind(&self, typed_name: &str) -> Option<FieldKind> {
        self.routes
            .iter()
            .find(|route| route.matches(typed_name))
            .map(|route| route.kind)
    }

    /// Whether the typed name is sensitive.
    #[must_use]
    pub fn is_sensitive(&self, typed_name: &str) -> bool {
        self.sensitive
            .iter()
            .any(|candidate| names_match(candidate, typed_name))
    }

    /// Produce the API field list for `container`.
    ///
    /// Fields are emitted in kind order (bool, int, float, string, string set,
    /// int set) and declaration order within a kind. Null and unknown
    /// attributes produce nothing.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::AttributeNotFound` or
    /// `FieldError::AttributeKindMismatch` when the container does not match
    /// the classification, and `FieldError::NonFiniteFloat` for a present NaN
    /// or infinite float.
    pub fn write_fields<C>(&self, container: &C) -> FieldResult<Vec<Field>>
    where
        C: FieldContainer + ?Sized,
    {
        let mut fields = Vec::new();
        for route in &self.routes {
            for name in &route.names {
                let attribute = get_attribute(container, name)?;
                if attribute.kind() != route.kind {
                    return Err(FieldError::AttributeKindMismatch {
                        attribute: name.clone(),
                        expected: route.kind,
                        actual: attribute.kind(),
                    });
                }
                let Some(value) = wire_value(name, attribute)? else {
                    continue;
                };
                let wire_name = self.translator.to_wire_name(name);
                trace!(field = wire_name, kind = %route.kind, "emitting field");
                fields.push(Field {
                    name: wire_name.to_string(),
                    value,
                });
            }
        }
        Ok(fields)
    }

    /// Populate `container` from an API field list.
    ///
    /// Fields with no classified counterpart are ignored. A non-null value for
    /// a sensitive attribute is skipped so the locally held secret survives.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::AttributeNotFound` or
    /// `FieldError::AttributeKindMismatch` when the container does not match
    /// the classification, and `FieldError::FieldTypeMismatch` under strict
    /// coercion. Fields before the failing one have already been applied.
    pub fn read_fields<C>(&self, fields: &[Field], container: &mut C) -> FieldResult<()>
    where
        C: FieldContainer + ?Sized,
    {
        for field in fields {
            self.read_field(field, container)?;
        }
        Ok(())
    }

    /// Apply a single API field to `container`; see [`FieldMapper::read_fields`].
    ///
    /// # Errors
    ///
    /// Same as [`FieldMapper::read_fields`].
    pub fn read_field<C>(&self, field: &Field, container: &mut C) -> FieldResult<()>
    where
        C: FieldContainer + ?Sized,
    {
        let typed_name = self.translator.to_typed_name(&field.name);
        if self.is_sensitive(typed_name) && !field.is_null() {
            debug!(field = %field.name, "keeping local value for sensitive field");
            return Ok(());
        }

        let Some(route) = self
            .routes
            .iter()
            .find(|route| route.matches(typed_name))
        else {
            trace!(field = %field.name, "ignoring unclassified field");
            return Ok(());
        };

        let Some(value) = self.typed_value(route.kind, &field.name, &field.value)? else {
            trace!(field = %field.name, "empty list leaves set attribute unchanged");
            return Ok(());
        };
        get_attribute_mut(container, typed_name)?.set(typed_name, value)
    }

    fn typed_value(&self, kind: FieldKind, name: &str, value: &Value) -> FieldResult<Option<TypedValue>> {
        if value.is_null() {
            return Ok(Some(TypedValue::null(kind)));
        }

        let policy = self.options.coercion;
        let typed = match kind {
            FieldKind::Bool => TypedValue::Bool(AttrValue::Present(coerce::to_bool(policy, name, value)?)),
            FieldKind::Int => TypedValue::Int(AttrValue::Present(coerce::to_int(policy, name, value)?)),
            FieldKind::Float => {
                TypedValue::Float(AttrValue::Present(coerce::to_float(policy, name, value)?))
            }
            FieldKind::String => {
                TypedValue::String(AttrValue::Present(coerce::to_string(policy, name, value)?))
            }
            FieldKind::StringSet => {
                let items = coerce::to_string_list(policy, name, value)?;
                if items.is_empty() && self.options.empty_sets == EmptySetPolicy::Preserve {
                    return Ok(None);
                }
                TypedValue::StringSet(AttrValue::Present(items.into_iter().collect()))
            }
            FieldKind::IntSet => {
                let items = coerce::to_int_list(policy, name, value)?;
                if items.is_empty() && self.options.empty_sets == EmptySetPolicy::Preserve {
                    return Ok(None);
                }
                TypedValue::IntSet(AttrValue::Present(items.into_iter().collect()))
            }
        };
        Ok(Some(typed))
    }
}

fn wire_value(name: &str, attribute: Attribute<'_>) -> FieldResult<Option<Value>> {
    let value = match attribute {
        Attribute::Bool(value) => value.as_present().map(|flag| Value::Bool(*flag)),
        Attribute::Int(value) => value.as_present().map(|number| Value::from(*number)),
        Attribute::Float(value) => value
            .as_present()
            .map(|number| float_value(name, *number))
            .transpose()?,
        Attribute::String(value) => value.as_present().map(|text| Value::String(text.clone())),
        Attribute::StringSet(value) => value.as_present().map(string_list),
        Attribute::IntSet(value) => value.as_present().map(int_list),
    };
    Ok(value)
}

fn float_value(name: &str, number: f64) -> FieldResult<Value> {
    Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| FieldError::NonFiniteFloat {
            attribute: name.to_string(),
        })
}

fn string_list(items: &StringSet) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn int_list(items: &IntSet) -> Value {
    Value::Array(items.iter().copied().map(Value::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Indexer {
        enable_rss: AttrValue<bool>,
        priority: AttrValue<i64>,
        seed_ratio: AttrValue<f64>,
        base_url: AttrValue<String>,
        api_key: AttrValue<String>,
        categories: AttrValue<IntSet>,
        field_tags: AttrValue<StringSet>,
    }

    crate::field_container!(Indexer {
        enable_rss: Bool,
        priority: Int,
        seed_ratio: Float,
        base_url: String,
        api_key: String,
        categories: IntSet,
        field_tags: StringSet,
    });

    fn mapper() -> FieldMapper {
        let classification = FieldClassification::new()
            .with_bucket(FieldKind::Bool, ["enableRss"])
            .with_bucket(FieldKind::Int, ["priority"])
            .with_exceptions(FieldKind::Float, ["seedRatio"])
            .with_bucket(FieldKind::String, ["baseUrl", "apiKey"])
            .with_bucket(FieldKind::IntSet, ["categories"])
            .with_exceptions(FieldKind::StringSet, ["fieldTags"])
            .with_sensitive(["apiKey"]);
        let translator = NameTranslator::new([
            crate::ExceptionEntry::new("tags", "fieldTags"),
            crate::ExceptionEntry::new("seedCriteria.seedRatio", "seedRatio"),
        ]);
        FieldMapper::new(&classification, translator).expect("classification should compile")
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn mapper_is_shareable_across_threads() {
        assert_send_sync::<FieldMapper>();
        assert_send_sync::<FieldClassification>();
        assert_send_sync::<NameTranslator>();
    }

    #[test]
    fn routes_resolve_base_and_exception_names() {
        let mapper = mapper();
        assert_eq!(mapper.route_kind("priority"), Some(FieldKind::Int));
        assert_eq!(mapper.route_kind("seedRatio"), Some(FieldKind::Float));
        assert_eq!(mapper.route_kind("missing"), None);
        assert_eq!(mapper.routes.len(), 6);
    }

    #[test]
    fn routes_skip_empty_kinds() {
        let classification = FieldClassification::new()
            .with_bucket(FieldKind::Int, ["priority"])
            .with_exceptions(FieldKind::StringSet, ["fieldTags"]);
        let mapper = FieldMapper::new(&classification, NameTranslator::identity())
            .expect("classification should compile");
        let kinds: Vec<FieldKind> = mapper.routes.iter().map(|route| route.kind).collect();
        assert_eq!(kinds, vec![FieldKind::Int, FieldKind::StringSet]);
        assert_eq!(mapper.route_kind("enableRss"), None);
    }

    #[test]
    fn non_finite_float_is_rejected_instead_of_sent_as_null() {
        for ratio in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let indexer = Indexer {
                seed_ratio: AttrValue::present(ratio),
                ..Indexer::default()
            };
            let err = mapper().write_fields(&indexer).unwrap_err();
            assert_eq!(
                err,
                FieldError::NonFiniteFloat {
                    attribute: "seedRatio".to_string()
                }
            );
        }
    }

    #[test]
    fn renamed_wire_name_does_not_route_by_its_raw_spelling() {
        let classification = FieldClassification::new().with_bucket(FieldKind::String, ["baseUrl"]);
        let translator = NameTranslator::new([crate::ExceptionEntry::new("baseUrl", "apiKey")]);
        let mapper =
            FieldMapper::new(&classification, translator).expect("classification should compile");
        let mut indexer = Indexer::default();
        mapper
            .read_field(&Field::new("baseUrl", "x"), &mut indexer)
            .expect("unclassified typed name is ignored");
        assert_eq!(indexer, Indexer::default());
    }

    #[test]
    fn write_fields_uses_kind_order_and_wire_names() {
        let indexer = Indexer {
            enable_rss: AttrValue::present(true),
            priority: AttrValue::present(25),
            seed_ratio: AttrValue::present(1.5),
            base_url: AttrValue::present("https://indexer".to_string()),
            api_key: AttrValue::unknown(),
            categories: AttrValue::present(IntSet::from([5030, 2000])),
            field_tags: AttrValue::null(),
        };
        let fields = mapper().write_fields(&indexer).expect("fields should be produced");
        assert_eq!(
            fields,
            vec![
                Field::new("enableRss", true),
                Field::new("priority", 25),
                Field::new("seedCriteria.seedRatio", 1.5),
                Field::new("baseUrl", "https://indexer"),
                Field::new("categories", json!([2000, 5030])),
            ]
        );
    }

    #[test]
    fn read_field_routes_through_exceptions() {
        let mut indexer = Indexer::default();
        let mapper = mapper();
        mapper
            .read_field(&Field::new("seedCriteria.seedRatio", 2.0), &mut indexer)
            .expect("exception field should route");
        mapper
            .read_field(&Field::new("tags", json!(["hd"])), &mut indexer)
            .expect("renamed set should route");
        assert_eq!(indexer.seed_ratio, AttrValue::Present(2.0));
        assert_eq!(
            indexer.field_tags,
            AttrValue::Present(StringSet::from(["hd".to_string()]))
        );
    }

    #[test]
    fn empty_set_policy_controls_clearing() {
        let mut indexer = Indexer {
            categories: AttrValue::present(IntSet::from([2000])),
            ..Indexer::default()
        };
        let empty = Field::new("categories", json!([]));

        mapper().read_field(&empty, &mut indexer).expect("empty list");
        assert_eq!(indexer.categories, AttrValue::Present(IntSet::from([2000])));

        let clearing = mapper().with_options(MarshalOptions {
            empty_sets: EmptySetPolicy::Clear,
            ..MarshalOptions::default()
        });
        clearing.read_field(&empty, &mut indexer).expect("empty list");
        assert_eq!(indexer.categories, AttrValue::Present(IntSet::new()));
    }

    #[test]
    fn kind_mismatch_between_classification_and_container_is_reported() {
        let classification = FieldClassification::new().with_bucket(FieldKind::Int, ["baseUrl"]);
        let mapper = FieldMapper::new(&classification, NameTranslator::identity())
            .expect("classification should compile");
        let indexer = Indexer {
            base_url: AttrValue::present("x".to_string()),
            ..Indexer::default()
        };
        let err = mapper.write_fields(&indexer).unwrap_err();
        assert_eq!(
            err,
            FieldError::AttributeKindMismatch {
                attribute: "baseUrl".to_string(),
                expected: FieldKind::Int,
                actual: FieldKind::String,
            }
        );

        let mut target = Indexer::default();
        let err = mapper
            .read_field(&Field::new("baseUrl", 3.0), &mut target)
            .unwrap_err();
        assert!(matches!(err, FieldError::AttributeKindMismatch { .. }));
    }

    #[test]
    fn options_deserialise_from_camel_case() {
        let options: MarshalOptions =
            serde_json::from_value(json!({ "coercion": "strict", "emptySets": "clear" }))
                .expect("options should parse");
        assert_eq!(options.coercion, CoercionPolicy::Strict);
        assert_eq!(options.empty_sets, EmptySetPolicy::Clear);
        assert_eq!(mapper().with_options(options).options(), options);
    }
}

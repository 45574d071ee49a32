//! Named attribute access on typed containers.
//!
//! # Design
//! - Containers expose their attributes through `FieldContainer` instead of
//!   runtime reflection; the [`field_container!`](crate::field_container) macro
//!   generates the lookup for plain structs.
//! - Borrowed views (`Attribute`, `AttributeMut`) carry the kind so the engine
//!   can check it against the classification before reading or writing.

use crate::error::{FieldError, FieldResult};
use crate::field::FieldKind;
use crate::value::{AttrValue, IntSet, StringSet};

/// Shared view of one container attribute.
#[derive(Debug, Clone, Copy)]
pub enum Attribute<'a> {
    /// Scalar boolean attribute.
    Bool(&'a AttrValue<bool>),
    /// Scalar integer attribute.
    Int(&'a AttrValue<i64>),
    /// Scalar float attribute.
    Float(&'a AttrValue<f64>),
    /// Scalar string attribute.
    String(&'a AttrValue<String>),
    /// Set-of-string attribute.
    StringSet(&'a AttrValue<StringSet>),
    /// Set-of-integer attribute.
    IntSet(&'a AttrValue<IntSet>),
}

impl Attribute<'_> {
    /// Kind of the underlying attribute.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::String(_) => FieldKind::String,
            Self::StringSet(_) => FieldKind::StringSet,
            Self::IntSet(_) => FieldKind::IntSet,
        }
    }

    /// Whether the attribute is null or unknown.
    #[must_use]
    pub const fn is_null_or_unknown(&self) -> bool {
        match self {
            Self::Bool(value) => !value.is_present(),
            Self::Int(value) => !value.is_present(),
            Self::Float(value) => !value.is_present(),
            Self::String(value) => !value.is_present(),
            Self::StringSet(value) => !value.is_present(),
            Self::IntSet(value) => !value.is_present(),
        }
    }
}

/// Owned tri-state value tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Scalar boolean value.
    Bool(AttrValue<bool>),
    /// Scalar integer value.
    Int(AttrValue<i64>),
    /// Scalar float value.
    Float(AttrValue<f64>),
    /// Scalar string value.
    String(AttrValue<String>),
    /// Set-of-string value.
    StringSet(AttrValue<StringSet>),
    /// Set-of-integer value.
    IntSet(AttrValue<IntSet>),
}

impl TypedValue {
    /// Null value of the given kind.
    #[must_use]
    pub const fn null(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Self::Bool(AttrValue::Null),
            FieldKind::Int => Self::Int(AttrValue::Null),
            FieldKind::Float => Self::Float(AttrValue::Null),
            FieldKind::String => Self::String(AttrValue::Null),
            FieldKind::StringSet => Self::StringSet(AttrValue::Null),
            FieldKind::IntSet => Self::IntSet(AttrValue::Null),
        }
    }

    /// Kind carried by the value.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::String(_) => FieldKind::String,
            Self::StringSet(_) => FieldKind::StringSet,
            Self::IntSet(_) => FieldKind::IntSet,
        }
    }
}

/// Exclusive view of one container attribute.
#[derive(Debug)]
pub enum AttributeMut<'a> {
    /// Scalar boolean attribute.
    Bool(&'a mut AttrValue<bool>),
    /// Scalar integer attribute.
    Int(&'a mut AttrValue<i64>),
    /// Scalar float attribute.
    Float(&'a mut AttrValue<f64>),
    /// Scalar string attribute.
    String(&'a mut AttrValue<String>),
    /// Set-of-string attribute.
    StringSet(&'a mut AttrValue<StringSet>),
    /// Set-of-integer attribute.
    IntSet(&'a mut AttrValue<IntSet>),
}

impl AttributeMut<'_> {
    /// Kind of the underlying attribute.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::String(_) => FieldKind::String,
            Self::StringSet(_) => FieldKind::StringSet,
            Self::IntSet(_) => FieldKind::IntSet,
        }
    }

    /// Assign `value` to the attribute.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::AttributeKindMismatch` when the value's kind differs
    /// from the attribute's kind; the attribute is left untouched.
    pub fn set(self, attribute: &str, value: TypedValue) -> FieldResult<()> {
        match (self, value) {
            (Self::Bool(slot), TypedValue::Bool(value)) => *slot = value,
            (Self::Int(slot), TypedValue::Int(value)) => *slot = value,
            (Self::Float(slot), TypedValue::Float(value)) => *slot = value,
            (Self::String(slot), TypedValue::String(value)) => *slot = value,
            (Self::StringSet(slot), TypedValue::StringSet(value)) => *slot = value,
            (Self::IntSet(slot), TypedValue::IntSet(value)) => *slot = value,
            (slot, value) => {
                return Err(FieldError::AttributeKindMismatch {
                    attribute: attribute.to_string(),
                    expected: value.kind(),
                    actual: slot.kind(),
                });
            }
        }
        Ok(())
    }
}

/// Typed container whose attributes can be located by name.
///
/// Implementations must match names ignoring ASCII case (see
/// [`names_match`](crate::names::names_match)).
pub trait FieldContainer {
    /// Shared view of the attribute called `name`.
    fn attribute(&self, name: &str) -> Option<Attribute<'_>>;

    /// Exclusive view of the attribute called `name`.
    fn attribute_mut(&mut self, name: &str) -> Option<AttributeMut<'_>>;
}

/// Locate `name` on `container`.
///
/// # Errors
///
/// Returns `FieldError::AttributeNotFound` when the container has no such attribute.
pub fn get_attribute<'a, C>(container: &'a C, name: &str) -> FieldResult<Attribute<'a>>
where
    C: FieldContainer + ?Sized,
{
    container
        .attribute(name)
        .ok_or_else(|| FieldError::AttributeNotFound {
            attribute: name.to_string(),
        })
}

/// Locate `name` on `container` for writing.
///
/// # Errors
///
/// Returns `FieldError::AttributeNotFound` when the container has no such attribute.
pub fn get_attribute_mut<'a, C>(container: &'a mut C, name: &str) -> FieldResult<AttributeMut<'a>>
where
    C: FieldContainer + ?Sized,
{
    container
        .attribute_mut(name)
        .ok_or_else(|| FieldError::AttributeNotFound {
            attribute: name.to_string(),
        })
}

/// Assign `value` to the attribute called `name` on `container`.
///
/// # Errors
///
/// Returns `FieldError::AttributeNotFound` or `FieldError::AttributeKindMismatch`.
pub fn set_attribute<C>(container: &mut C, name: &str, value: TypedValue) -> FieldResult<()>
where
    C: FieldContainer + ?Sized,
{
    get_attribute_mut(container, name)?.set(name, value)
}

/// Implement [`FieldContainer`] for a struct of [`AttrValue`] members.
///
/// Each member is listed with its kind (`Bool`, `Int`, `Float`, `String`,
/// `StringSet`, `IntSet`). Lookup compares the member name against the
/// requested name ignoring case and underscores, so `seed_time` answers to
/// `seedTime`.
///
/// ```
/// use fieldbridge_core::{AttrValue, field_container};
///
/// #[derive(Default)]
/// struct Indexer {
///     base_url: AttrValue<String>,
///     priority: AttrValue<i64>,
/// }
///
/// field_container!(Indexer {
///     base_url: String,
///     priority: Int,
/// });
/// ```
#[macro_export]
macro_rules! field_container {
    ($container:ty { $($member:ident : $kind:ident),* $(,)? }) => {
        impl $crate::FieldContainer for $container {
            fn attribute(&self, name: &str) -> ::core::option::Option<$crate::Attribute<'_>> {
                $(
                    if $crate::names::names_match(::core::stringify!($member), name) {
                        return ::core::option::Option::Some($crate::Attribute::$kind(&self.$member));
                    }
                )*
                ::core::option::Option::None
            }

            fn attribute_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<$crate::AttributeMut<'_>> {
                $(
                    if $crate::names::names_match(::core::stringify!($member), name) {
                        return ::core::option::Option::Some($crate::AttributeMut::$kind(&mut self.$member));
                    }
                )*
                ::core::option::Option::None
            }
        }
    };
}

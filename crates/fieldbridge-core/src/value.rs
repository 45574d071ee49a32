//! Tri-state attribute values held by typed containers.
//!
//! # Design
//! - `Unknown` only exists on the typed side; the wire format has no equivalent.
//! - Serialises like `Option<T>`: both `Null` and `Unknown` become JSON `null`.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered set of integers stored in set-of-int attributes.
pub type IntSet = BTreeSet<i64>;

/// Ordered set of strings stored in set-of-string attributes.
pub type StringSet = BTreeSet<String>;

/// Attribute value with explicit null and unknown states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue<T> {
    /// Attribute is absent.
    Null,
    /// Attribute has not been resolved yet by the surrounding system.
    Unknown,
    /// Attribute carries a concrete value.
    Present(T),
}

impl<T> AttrValue<T> {
    /// Construct the null state.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Construct the unknown state.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::Unknown
    }

    /// Wrap a concrete value.
    #[must_use]
    pub const fn present(value: T) -> Self {
        Self::Present(value)
    }

    /// Whether the value is in the null state.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value is in the unknown state.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Whether a concrete value is held.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the concrete value, treating null and unknown alike.
    #[must_use]
    pub const fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Null | Self::Unknown => None,
        }
    }

    /// Consume the value, treating null and unknown alike.
    #[must_use]
    pub fn into_present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Null | Self::Unknown => None,
        }
    }
}

impl<T> Default for AttrValue<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> From<Option<T>> for AttrValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Present)
    }
}

impl<T: Serialize> Serialize for AttrValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Null | Self::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for AttrValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

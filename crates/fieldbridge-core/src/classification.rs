//! Static per-resource classification of API-backed attribute names.
//!
//! # Design
//! - Pure lookup table; no behaviour beyond validation.
//! - Each kind has a base list and an "exceptions" twin for names that need the
//!   exception table. Both route to the same writer.
//! - Built once per resource type and shared read-only.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};
use crate::field::FieldKind;
use crate::names::names_match;

/// Declares which attribute names belong to which value kind for one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FieldClassification {
    /// Scalar boolean attributes.
    pub bools: Vec<String>,
    /// Scalar boolean attributes renamed through the exception table.
    pub bools_exceptions: Vec<String>,
    /// Scalar integer attributes.
    pub ints: Vec<String>,
    /// Scalar integer attributes renamed through the exception table.
    pub ints_exceptions: Vec<String>,
    /// Scalar float attributes.
    pub floats: Vec<String>,
    /// Scalar float attributes renamed through the exception table.
    pub floats_exceptions: Vec<String>,
    /// Scalar string attributes.
    pub strings: Vec<String>,
    /// Scalar string attributes renamed through the exception table.
    pub strings_exceptions: Vec<String>,
    /// Set-of-string attributes.
    pub string_sets: Vec<String>,
    /// Set-of-string attributes renamed through the exception table.
    pub string_sets_exceptions: Vec<String>,
    /// Set-of-integer attributes.
    pub int_sets: Vec<String>,
    /// Set-of-integer attributes renamed through the exception table.
    pub int_sets_exceptions: Vec<String>,
    /// Attributes whose server-echoed value must not replace the local one.
    pub sensitive: Vec<String>,
}

impl FieldClassification {
    /// Empty classification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append names to the base list of `kind`.
    #[must_use]
    pub fn with_bucket<I, S>(mut self, kind: FieldKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_mut(kind).extend(names.into_iter().map(Into::into));
        self
    }

    /// Append names to the exceptions list of `kind`.
    #[must_use]
    pub fn with_exceptions<I, S>(mut self, kind: FieldKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions_mut(kind)
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Append names to the sensitive list.
    #[must_use]
    pub fn with_sensitive<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive.extend(names.into_iter().map(Into::into));
        self
    }

    /// Base list for `kind`.
    #[must_use]
    pub fn bucket(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Bool => &self.bools,
            FieldKind::Int => &self.ints,
            FieldKind::Float => &self.floats,
            FieldKind::String => &self.strings,
            FieldKind::StringSet => &self.string_sets,
            FieldKind::IntSet => &self.int_sets,
        }
    }

    /// Exceptions list for `kind`.
    #[must_use]
    pub fn exceptions(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Bool => &self.bools_exceptions,
            FieldKind::Int => &self.ints_exceptions,
            FieldKind::Float => &self.floats_exceptions,
            FieldKind::String => &self.strings_exceptions,
            FieldKind::StringSet => &self.string_sets_exceptions,
            FieldKind::IntSet => &self.int_sets_exceptions,
        }
    }

    /// Base list followed by the exceptions list for `kind`, without repeats.
    #[must_use]
    pub fn names(&self, kind: FieldKind) -> Vec<&str> {
        let mut merged: Vec<&str> = Vec::new();
        for name in self.bucket(kind).iter().chain(self.exceptions(kind)) {
            if !merged.iter().any(|seen| names_match(seen, name)) {
                merged.push(name);
            }
        }
        merged
    }

    /// Kind of the bucket holding `name`, if any.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        FieldKind::ORDER.into_iter().find(|kind| {
            self.bucket(*kind)
                .iter()
                .chain(self.exceptions(*kind))
                .any(|candidate| names_match(candidate, name))
        })
    }

    /// Whether `name` is listed as sensitive.
    #[must_use]
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.sensitive
            .iter()
            .any(|candidate| names_match(candidate, name))
    }

    /// Check the table invariants.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidClassification` for blank names or sensitive
    /// names that are not classified, and `FieldError::DuplicateClassification`
    /// when a name appears under two different kinds. A name may repeat between
    /// a kind's base and exceptions lists.
    pub fn validate(&self) -> FieldResult<()> {
        let mut seen: Vec<(&str, FieldKind)> = Vec::new();
        for kind in FieldKind::ORDER {
            for name in self.bucket(kind).iter().chain(self.exceptions(kind)) {
                if name.trim().is_empty() {
                    return Err(FieldError::InvalidClassification {
                        name: name.clone(),
                        reason: "blank_name",
                    });
                }
                match seen.iter().find(|(other, _)| names_match(other, name)) {
                    Some((_, first)) if *first != kind => {
                        return Err(FieldError::DuplicateClassification {
                            name: name.clone(),
                            first: *first,
                            second: kind,
                        });
                    }
                    Some(_) => {}
                    None => seen.push((name.as_str(), kind)),
                }
            }
        }

        if let Some(name) = self
            .sensitive
            .iter()
            .find(|name| self.kind_of(name).is_none())
        {
            return Err(FieldError::InvalidClassification {
                name: name.clone(),
                reason: "sensitive_not_classified",
            });
        }

        Ok(())
    }

    fn base_mut(&mut self, kind: FieldKind) -> &mut Vec<String> {
        match kind {
            FieldKind::Bool => &mut self.bools,
            FieldKind::Int => &mut self.ints,
            FieldKind::Float => &mut self.floats,
            FieldKind::String => &mut self.strings,
            FieldKind::StringSet => &mut self.string_sets,
            FieldKind::IntSet => &mut self.int_sets,
        }
    }

    fn exceptions_mut(&mut self, kind: FieldKind) -> &mut Vec<String> {
        match kind {
            FieldKind::Bool => &mut self.bools_exceptions,
            FieldKind::Int => &mut self.ints_exceptions,
            FieldKind::Float => &mut self.floats_exceptions,
            FieldKind::String => &mut self.strings_exceptions,
            FieldKind::StringSet => &mut self.string_sets_exceptions,
            FieldKind::IntSet => &mut self.int_sets_exceptions,
        }
    }
}

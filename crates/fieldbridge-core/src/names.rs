//! Translation between API wire names and typed attribute names.
//!
//! # Design
//! - Most names relate by case-folding alone and need no table entry.
//! - The exception table covers genuine renames (nested paths, reserved names).
//! - Lookups are linear; tables hold a handful of entries.

use serde::{Deserialize, Serialize};

/// One explicit rename between the API spelling and the typed spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEntry {
    /// Name as used in the API field list.
    pub wire_name: String,
    /// Name as used on the typed container.
    pub typed_name: String,
}

impl ExceptionEntry {
    /// Pair a wire name with its typed counterpart.
    #[must_use]
    pub fn new(wire_name: impl Into<String>, typed_name: impl Into<String>) -> Self {
        Self {
            wire_name: wire_name.into(),
            typed_name: typed_name.into(),
        }
    }
}

/// Static exception table applied in both translation directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTranslator {
    exceptions: Vec<ExceptionEntry>,
}

impl NameTranslator {
    /// Build a translator from an exception table.
    #[must_use]
    pub fn new(exceptions: impl IntoIterator<Item = ExceptionEntry>) -> Self {
        Self {
            exceptions: exceptions.into_iter().collect(),
        }
    }

    /// Translator with an empty exception table.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            exceptions: Vec::new(),
        }
    }

    /// Map a typed name to its wire name; names without an exception pass through.
    #[must_use]
    pub fn to_wire_name<'a>(&'a self, typed_name: &'a str) -> &'a str {
        self.exceptions
            .iter()
            .find(|entry| entry.typed_name == typed_name)
            .map_or(typed_name, |entry| entry.wire_name.as_str())
    }

    /// Map a wire name to its typed name; names without an exception pass through.
    #[must_use]
    pub fn to_typed_name<'a>(&'a self, wire_name: &'a str) -> &'a str {
        self.exceptions
            .iter()
            .find(|entry| entry.wire_name == wire_name)
            .map_or(wire_name, |entry| entry.typed_name.as_str())
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn exceptions(&self) -> &[ExceptionEntry] {
        &self.exceptions
    }
}

/// Compare two attribute names ignoring ASCII case and underscores.
///
/// Underscores are skipped so snake_case member names (`base_url`) line up
/// with the API's camelCase spelling (`baseUrl`).
#[must_use]
pub fn names_match(left: &str, right: &str) -> bool {
    fold(left).eq(fold(right))
}

fn fold(name: &str) -> impl Iterator<Item = u8> + '_ {
    name.bytes()
        .filter(|byte| *byte != b'_')
        .map(|byte| byte.to_ascii_lowercase())
}

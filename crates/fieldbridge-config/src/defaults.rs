//! Standard exception table for the media-automation APIs.
//!
//! # Design
//! - Nested seed criteria are flattened onto the typed side.
//! - `tags` collides with the resource-level tag list, so the field-level copy
//!   is exposed as `fieldTags`.

use fieldbridge_core::ExceptionEntry;

const DEFAULT_EXCEPTIONS: [(&str, &str); 5] = [
    ("tags", "fieldTags"),
    ("seedCriteria.seedTime", "seedTime"),
    ("seedCriteria.seedRatio", "seedRatio"),
    ("seedCriteria.seasonPackSeedTime", "seasonPackSeedTime"),
    ("seedCriteria.discographySeedTime", "discographySeedTime"),
];

/// Exception table used when a catalog document does not declare its own.
#[must_use]
pub fn default_exceptions() -> Vec<ExceptionEntry> {
    DEFAULT_EXCEPTIONS
        .iter()
        .map(|(wire, typed)| ExceptionEntry::new(*wire, *typed))
        .collect()
}

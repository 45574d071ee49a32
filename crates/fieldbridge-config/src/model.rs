//! Catalog document shape.
//!
//! # Design
//! - Pure data carriers deserialised from JSON; checks live in `validate.rs`.
//! - Keys use the API's camelCase spelling.

use std::collections::BTreeMap;

use fieldbridge_core::{ExceptionEntry, FieldClassification, MarshalOptions};
use serde::{Deserialize, Serialize};

/// Top-level catalog document.
///
/// ```json
/// {
///   "exceptions": [{ "wireName": "tags", "typedName": "fieldTags" }],
///   "options": { "coercion": "lenient", "emptySets": "preserve" },
///   "resources": {
///     "download_client_qbittorrent": { "ints": ["port"], "sensitive": [] }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogDocument {
    /// Exception table; the standard table applies when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<Vec<ExceptionEntry>>,
    /// Marshaling options applied to every resource.
    #[serde(default)]
    pub options: MarshalOptions,
    /// Classification per resource type.
    #[serde(default)]
    pub resources: BTreeMap<String, FieldClassification>,
}

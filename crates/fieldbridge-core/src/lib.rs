#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Two-way mapping between typed resource containers and the loosely typed
//! `{name, value}` field lists exchanged with the remote API.
//!
//! Layout: `value.rs` (tri-state attribute values), `field.rs` (wire fields and
//! kinds), `names.rs` (wire/typed name translation), `classification.rs`
//! (per-resource bucket tables), `container.rs` (named attribute access),
//! `engine.rs` (`FieldMapper`, outbound and inbound marshaling).

pub mod classification;
mod coerce;
pub mod container;
pub mod engine;
pub mod error;
pub mod field;
pub mod names;
pub mod value;

pub use classification::FieldClassification;
pub use coerce::CoercionPolicy;
pub use container::{
    Attribute, AttributeMut, FieldContainer, TypedValue, get_attribute, get_attribute_mut,
    set_attribute,
};
pub use engine::{EmptySetPolicy, FieldMapper, MarshalOptions};
pub use error::{FieldError, FieldResult};
pub use field::{Field, FieldKind, find_field, json_type_name};
pub use names::{ExceptionEntry, NameTranslator, names_match};
pub use value::{AttrValue, IntSet, StringSet};

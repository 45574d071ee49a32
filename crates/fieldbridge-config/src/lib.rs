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

//! Catalog of per-resource field classifications loaded from JSON documents.
//!
//! Layout: `model.rs` (catalog document shape), `defaults.rs` (standard
//! exception table), `validate.rs` (document checks), `loader.rs` (parsing and
//! the compiled `Catalog`).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::default_exceptions;
pub use error::{ConfigError, ConfigResult};
pub use loader::{Catalog, load_catalog_file, load_catalog_str};
pub use model::CatalogDocument;

//! Sample containers, classifications, and field builders.
//!
//! The download-client resource mirrors a torrent client integration: plain
//! scalars, nested seed criteria renamed through the exception table, tag sets,
//! and two secrets.

use fieldbridge_core::{
    AttrValue, ExceptionEntry, Field, FieldClassification, FieldKind, FieldMapper, FieldResult,
    IntSet, NameTranslator, StringSet, field_container,
};
use serde_json::Value;

/// Typed model of a download-client resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadClientResource {
    /// Connect over TLS.
    pub use_ssl: AttrValue<bool>,
    /// Download pieces in order.
    pub sequential_order: AttrValue<bool>,
    /// Client port.
    pub port: AttrValue<i64>,
    /// Priority used for recently aired items.
    pub recent_tv_priority: AttrValue<i64>,
    /// Minimum seeding time in minutes (`seedCriteria.seedTime` on the wire).
    pub seed_time: AttrValue<i64>,
    /// Seeding ratio goal (`seedCriteria.seedRatio` on the wire).
    pub seed_ratio: AttrValue<f64>,
    /// Client host name.
    pub host: AttrValue<String>,
    /// URL prefix of the client web UI.
    pub url_base: AttrValue<String>,
    /// Login user.
    pub username: AttrValue<String>,
    /// Login password.
    pub password: AttrValue<String>,
    /// API key for clients that use token auth.
    pub api_key: AttrValue<String>,
    /// Client-side labels (`tags` on the wire).
    pub field_tags: AttrValue<StringSet>,
    /// Categories assigned to grabbed items.
    pub categories: AttrValue<StringSet>,
    /// Tag identifiers linked to the client.
    pub tag_ids: AttrValue<IntSet>,
}

field_container!(DownloadClientResource {
    use_ssl: Bool,
    sequential_order: Bool,
    port: Int,
    recent_tv_priority: Int,
    seed_time: Int,
    seed_ratio: Float,
    host: String,
    url_base: String,
    username: String,
    password: String,
    api_key: String,
    field_tags: StringSet,
    categories: StringSet,
    tag_ids: IntSet,
});

/// Classification for [`DownloadClientResource`].
#[must_use]
pub fn download_client_classification() -> FieldClassification {
    FieldClassification::new()
        .with_bucket(FieldKind::Bool, ["useSsl", "sequentialOrder"])
        .with_bucket(FieldKind::Int, ["port", "recentTvPriority"])
        .with_exceptions(FieldKind::Int, ["seedTime"])
        .with_exceptions(FieldKind::Float, ["seedRatio"])
        .with_bucket(
            FieldKind::String,
            ["host", "urlBase", "username", "password", "apiKey"],
        )
        .with_bucket(FieldKind::StringSet, ["categories"])
        .with_exceptions(FieldKind::StringSet, ["fieldTags"])
        .with_bucket(FieldKind::IntSet, ["tagIds"])
        .with_sensitive(["password", "apiKey"])
}

/// Exception table used by the download-client fixtures.
#[must_use]
pub fn download_client_exceptions() -> NameTranslator {
    NameTranslator::new([
        ExceptionEntry::new("tags", "fieldTags"),
        ExceptionEntry::new("seedCriteria.seedTime", "seedTime"),
        ExceptionEntry::new("seedCriteria.seedRatio", "seedRatio"),
    ])
}

/// Compiled mapper for [`DownloadClientResource`].
///
/// # Errors
///
/// Returns the classification validation error if the fixture table is malformed.
pub fn download_client_mapper() -> FieldResult<FieldMapper> {
    FieldMapper::new(
        &download_client_classification(),
        download_client_exceptions(),
    )
}

/// Download client with every attribute present.
#[must_use]
pub fn populated_download_client() -> DownloadClientResource {
    DownloadClientResource {
        use_ssl: AttrValue::present(true),
        sequential_order: AttrValue::present(false),
        port: AttrValue::present(8080),
        recent_tv_priority: AttrValue::present(1),
        seed_time: AttrValue::present(120),
        seed_ratio: AttrValue::present(1.5),
        host: AttrValue::present("qbittorrent".to_string()),
        url_base: AttrValue::present("/qbt".to_string()),
        username: AttrValue::present("admin".to_string()),
        password: AttrValue::present("hunter2".to_string()),
        api_key: AttrValue::present("secret".to_string()),
        field_tags: AttrValue::present(string_set(["hd", "anime"])),
        categories: AttrValue::present(string_set(["tv"])),
        tag_ids: AttrValue::present(IntSet::from([1, 2, 7])),
    }
}

/// Build a [`StringSet`] from string literals.
#[must_use]
pub fn string_set<const N: usize>(items: [&str; N]) -> StringSet {
    items.into_iter().map(str::to_string).collect()
}

/// Parse an API field list from a JSON array literal.
///
/// # Errors
///
/// Returns the deserialisation error when `payload` is not an array of fields.
pub fn fields_from_json(payload: Value) -> serde_json::Result<Vec<Field>> {
    serde_json::from_value(payload)
}

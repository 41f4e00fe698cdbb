//! Loosely-typed shapes of the source index payload.
//!
//! The payload is a nested JSON object: category name → group name → array
//! of raw entries. Nothing in it is guaranteed: fields may be missing, null,
//! or empty, and every access degrades to a documented default instead of
//! failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// The raw index payload: category name → group name → entries.
///
/// `BTreeMap` keeps iteration order deterministic, which matters because the
/// normalized output ordering is an observable contract.
pub type RawPayload = BTreeMap<String, BTreeMap<String, Vec<RawEntry>>>;

/// One leaf record from the source payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEntry {
    /// Document number, e.g. a specification identifier.
    #[serde(deserialize_with = "null_default")]
    pub document_number: String,
    /// Nested API description.
    pub api: Option<RawApi>,
    /// Comma-separated context tags.
    #[serde(deserialize_with = "null_default")]
    pub context: String,
    /// Lifecycle status label.
    #[serde(deserialize_with = "null_default")]
    pub lifecycle: String,
    /// Version label.
    #[serde(deserialize_with = "null_default")]
    pub version: String,
    /// Release label.
    #[serde(deserialize_with = "null_default")]
    pub release: String,
    /// Published-date string, free-form.
    #[serde(deserialize_with = "null_default")]
    pub published: String,
    /// Free-form notes, may carry HTML markup.
    #[serde(deserialize_with = "null_default")]
    pub notes: String,
    /// Download options attached to this entry.
    #[serde(deserialize_with = "null_default")]
    pub options: Vec<RawOption>,
}

/// Nested API description inside a raw entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawApi {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    /// Description, may carry HTML markup.
    #[serde(deserialize_with = "null_default")]
    pub description: String,
}

/// One downloadable artifact attached to a raw entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawOption {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub option_type: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub url: String,
    #[serde(deserialize_with = "null_default")]
    pub default: bool,
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
}

/// Deserialize a possibly-null field into its default value.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

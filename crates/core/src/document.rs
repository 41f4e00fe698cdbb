//! The normalized document model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A deduplicated, merged API specification record.
///
/// All raw entries sharing the same dedup key fold into exactly one
/// `Document`; derived fields (`search_index`, `latest_published`,
/// `primary_type`) are computed once at normalization time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Stable slug, unique within one load.
    pub id: String,
    /// Dedup key: document number, else API name, else first option name,
    /// else a synthesized placeholder.
    pub key: String,
    /// Document number (first non-empty value wins).
    pub document_number: String,
    /// API name (first non-empty value wins).
    pub api_name: String,
    /// Description, markup preserved for display.
    pub description: String,
    /// Category names this key appeared under.
    pub categories: BTreeSet<String>,
    /// Context tags parsed from the comma-separated raw field.
    pub contexts: BTreeSet<String>,
    /// Lifecycle statuses seen across contributing entries.
    pub lifecycle: BTreeSet<String>,
    /// Versions, deduplicated by label, sorted published desc then label desc.
    pub versions: Vec<Version>,
    /// Sorted distinct download-option types across all versions.
    pub option_types: Vec<String>,
    /// Lexicographically smallest option type, or empty.
    pub primary_type: String,
    /// Maximum parsed published timestamp across versions, in ms (0 if none parse).
    pub latest_published: i64,
    /// Lowercased, HTML-stripped concatenation of searchable fields.
    pub search_index: String,
}

/// One release/lifecycle snapshot of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    /// Version label; `"Unversioned"` when the raw entry carried none.
    pub label: String,
    pub release: String,
    pub lifecycle: String,
    /// Raw published-date string, preserved for display.
    pub published: String,
    /// Parsed published timestamp in ms, 0 when the string does not parse.
    pub published_ts: i64,
    /// Free-form notes, markup preserved for display.
    pub notes: String,
    /// Download options, sorted by type then name.
    pub options: Vec<DownloadOption>,
}

/// One downloadable artifact attached to a version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadOption {
    pub option_type: String,
    /// Display name; defaults to `"Download"` when the raw entry carried none.
    pub name: String,
    pub url: String,
    pub default: bool,
    pub icon: String,
}

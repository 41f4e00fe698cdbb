//! Normalization pipeline for the raw index payload.
//!
//! Walks the nested category → group → entries structure, merges duplicate
//! entries by their dedup key, and produces a flat, canonically sorted
//! collection of [`Document`]s with derived indices (search text, slug ids,
//! sort keys). Pure and infallible by contract: absent or malformed fields
//! degrade to defaults rather than erroring.

mod fold;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use specdex_core::{Document, RawPayload, slugify};

use crate::fold::{DocumentAcc, SlugAllocator, entry_key};

/// Normalize the raw payload into a deduplicated, sorted document collection.
///
/// Documents come out in canonical order: document number ascending, then
/// API name ascending, case-insensitive. Slug ids are unique within the
/// returned collection.
#[must_use]
pub fn normalize(raw: &RawPayload) -> Vec<Document> {
    // First-seen key order decides which colliding slug base keeps the bare slug.
    let mut order: Vec<String> = Vec::new();
    let mut accs: HashMap<String, DocumentAcc> = HashMap::new();

    for (category, groups) in raw {
        for entries in groups.values() {
            for entry in entries {
                let key = entry_key(entry);
                let acc = accs.entry(key.clone()).or_insert_with(|| {
                    order.push(key.clone());
                    DocumentAcc::new(key)
                });
                acc.fold(category, entry);
            }
        }
    }

    let mut slugs = SlugAllocator::default();
    let mut documents: Vec<Document> = order
        .into_iter()
        .filter_map(|key| accs.remove(&key))
        .map(|acc| {
            let id = slugs.allocate(&slugify(acc.key()));
            acc.finish(id)
        })
        .collect();

    documents.sort_by(|a, b| {
        a.document_number
            .to_lowercase()
            .cmp(&b.document_number.to_lowercase())
            .then_with(|| a.api_name.to_lowercase().cmp(&b.api_name.to_lowercase()))
    });

    tracing::debug!(documents = documents.len(), "normalized index payload");
    documents
}

/// Build the id → index map used for detail-route resolution.
#[must_use]
pub fn document_map(documents: &[Document]) -> BTreeMap<String, usize> {
    documents.iter().enumerate().map(|(ix, doc)| (doc.id.clone(), ix)).collect()
}

/// Sorted distinct category names across the collection.
#[must_use]
pub fn category_options(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .flat_map(|doc| doc.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct context tags across the collection.
#[must_use]
pub fn context_options(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .flat_map(|doc| doc.contexts.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: serde_json::Value) -> RawPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn entries_sharing_a_key_merge_into_one_document() {
        let raw = payload(serde_json::json!({
            "Billing": {
                "Core": [
                    {"documentNumber": "TS 1", "context": "retail", "lifecycle": "Active"}
                ]
            },
            "Charging": {
                "Core": [
                    {"documentNumber": "TS 1", "context": "wholesale", "lifecycle": "Deprecated"}
                ]
            }
        }));
        let docs = normalize(&raw);
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.key, "TS 1");
        assert_eq!(
            doc.categories.iter().collect::<Vec<_>>(),
            vec!["Billing", "Charging"]
        );
        assert_eq!(
            doc.contexts.iter().collect::<Vec<_>>(),
            vec!["retail", "wholesale"]
        );
        assert_eq!(
            doc.lifecycle.iter().collect::<Vec<_>>(),
            vec!["Active", "Deprecated"]
        );
    }

    #[test]
    fn first_non_empty_description_wins() {
        let raw = payload(serde_json::json!({
            "C": {
                "G": [
                    {"documentNumber": "TS 1", "api": {"name": "Billing", "description": "A"}},
                    {"documentNumber": "TS 1", "api": {"name": "Billing", "description": ""}}
                ]
            }
        }));
        assert_eq!(normalize(&raw)[0].description, "A");

        let raw = payload(serde_json::json!({
            "C": {
                "G": [
                    {"documentNumber": "TS 1", "api": {"name": "Billing", "description": ""}},
                    {"documentNumber": "TS 1", "api": {"name": "Billing", "description": "B"}}
                ]
            }
        }));
        assert_eq!(normalize(&raw)[0].description, "B");
    }

    #[test]
    fn colliding_slug_bases_get_unique_ids() {
        let raw = payload(serde_json::json!({
            "C": {
                "G": [
                    {"documentNumber": "TS 1"},
                    {"documentNumber": "TS-1"}
                ]
            }
        }));
        let docs = normalize(&raw);
        assert_eq!(docs.len(), 2);
        let map = document_map(&docs);
        assert_eq!(map.len(), 2);
        assert!(docs.iter().any(|d| d.id == "ts-1"));
        assert!(docs.iter().any(|d| d.id == "ts-1-1"));
    }

    #[test]
    fn bare_entry_synthesizes_untitled() {
        let raw = payload(serde_json::json!({"C": {"G": [{}]}}));
        let docs = normalize(&raw);
        assert_eq!(docs[0].key, "Untitled");
        assert_eq!(docs[0].document_number, "Untitled");
        assert_eq!(docs[0].id, "untitled");
    }

    #[test]
    fn versions_dedupe_by_label_and_sort_by_date_desc() {
        let raw = payload(serde_json::json!({
            "C": {
                "G": [
                    {"documentNumber": "TS 1", "version": "v1", "published": "2023-01-01"},
                    {"documentNumber": "TS 1", "version": "v2", "published": "2024-06-15"},
                    {"documentNumber": "TS 1", "version": "v1", "published": "", "release": "R19"}
                ]
            }
        }));
        let doc = &normalize(&raw)[0];
        assert_eq!(doc.versions.len(), 2);
        assert_eq!(doc.versions[0].label, "v2");
        assert_eq!(doc.versions[1].label, "v1");
        // first-wins applies inside a merged version too
        assert_eq!(doc.versions[1].published, "2023-01-01");
        assert_eq!(doc.versions[1].release, "R19");
        assert_eq!(doc.latest_published, specdex_core::parse_published_ms("2024-06-15"));
    }

    #[test]
    fn unparseable_date_sorts_last() {
        let raw = payload(serde_json::json!({
            "C": {
                "G": [
                    {"documentNumber": "TS 1", "version": "draft", "published": "whenever"},
                    {"documentNumber": "TS 1", "version": "v1", "published": "2023-01-01"}
                ]
            }
        }));
        let doc = &normalize(&raw)[0];
        assert_eq!(doc.versions[0].label, "v1");
        assert_eq!(doc.versions[1].label, "draft");
        assert_eq!(doc.versions[1].published_ts, 0);
    }

    #[test]
    fn missing_version_label_falls_back_to_unversioned() {
        let raw = payload(serde_json::json!({
            "C": {"G": [{"documentNumber": "TS 1", "published": "2023-01-01"}]}
        }));
        let doc = &normalize(&raw)[0];
        assert_eq!(doc.versions[0].label, "Unversioned");
    }

    #[test]
    fn options_sort_by_type_then_name_and_default_name_applies() {
        let raw = payload(serde_json::json!({
            "C": {
                "G": [{
                    "documentNumber": "TS 1",
                    "version": "v1",
                    "options": [
                        {"type": "yaml", "name": "B spec", "url": "u1"},
                        {"type": "json", "name": "", "url": "u2"},
                        {"type": "json", "name": "A spec", "url": "u3"}
                    ]
                }]
            }
        }));
        let doc = &normalize(&raw)[0];
        let options = &doc.versions[0].options;
        assert_eq!(options[0].option_type, "json");
        assert_eq!(options[0].name, "A spec");
        assert_eq!(options[1].name, "Download");
        assert_eq!(options[2].option_type, "yaml");
        assert_eq!(doc.option_types, vec!["json", "yaml"]);
        assert_eq!(doc.primary_type, "json");
    }

    #[test]
    fn search_index_strips_markup_but_description_keeps_it() {
        let raw = payload(serde_json::json!({
            "Billing": {
                "G": [{
                    "documentNumber": "TS 1",
                    "api": {"name": "Billing API", "description": "<p>Account <b>Management</b></p>"},
                    "context": "retail",
                    "lifecycle": "Active",
                    "version": "v2"
                }]
            }
        }));
        let doc = &normalize(&raw)[0];
        assert_eq!(doc.description, "<p>Account <b>Management</b></p>");
        assert!(doc.search_index.contains("account management"));
        assert!(!doc.search_index.contains('<'));
        for needle in ["ts 1", "billing api", "billing", "retail", "active", "v2"] {
            assert!(doc.search_index.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn canonical_order_is_number_then_name_case_insensitive() {
        // The two number-less entries key on their distinct API names, so they
        // stay separate documents and tie on the (empty) number leg.
        let raw = payload(serde_json::json!({
            "C": {
                "G": [
                    {"documentNumber": "TS 2", "api": {"name": "alpha"}},
                    {"api": {"name": "Zulu"}},
                    {"api": {"name": "beta"}}
                ]
            }
        }));
        let docs = normalize(&raw);
        let numbers: Vec<&str> = docs.iter().map(|d| d.document_number.as_str()).collect();
        assert_eq!(numbers, vec!["", "", "TS 2"]);
        let names: Vec<&str> = docs.iter().map(|d| d.api_name.as_str()).collect();
        assert_eq!(names, vec!["beta", "Zulu", "alpha"]);
    }

    #[test]
    fn option_lists_are_sorted_and_distinct() {
        let raw = payload(serde_json::json!({
            "Zeta": {"G": [{"documentNumber": "TS 1", "context": "retail"}]},
            "Alpha": {"G": [{"documentNumber": "TS 2", "context": "retail, core"}]}
        }));
        let docs = normalize(&raw);
        assert_eq!(category_options(&docs), vec!["Alpha", "Zeta"]);
        assert_eq!(context_options(&docs), vec!["core", "retail"]);
    }

    #[test]
    fn empty_payload_normalizes_to_empty_collection() {
        let docs = normalize(&RawPayload::new());
        assert!(docs.is_empty());
        assert!(document_map(&docs).is_empty());
    }
}

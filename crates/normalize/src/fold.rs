//! Accumulators that fold raw entries into per-key document state.
//!
//! Folding rules: first-non-empty-wins for scalar fields, set-union for
//! multi-valued fields, versions deduplicated by label. Nothing here can
//! fail; malformed input degrades to the documented defaults.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use specdex_core::{
    DEFAULT_OPTION_NAME, Document, DownloadOption, RawEntry, UNTITLED_KEY, UNVERSIONED_LABEL,
    Version, parse_published_ms, split_tags, strip_html,
};

/// Set `slot` to `candidate` only if the slot is still empty and the
/// candidate is not. Later non-empty values never overwrite.
fn first_wins(slot: &mut String, candidate: &str) {
    let candidate = candidate.trim();
    if slot.is_empty() && !candidate.is_empty() {
        *slot = candidate.to_owned();
    }
}

/// Compute the dedup key for a raw entry: document number, else API name,
/// else the first option's name, else a synthesized placeholder.
pub(crate) fn entry_key(entry: &RawEntry) -> String {
    let number = entry.document_number.trim();
    if !number.is_empty() {
        return number.to_owned();
    }
    if let Some(api) = &entry.api {
        let name = api.name.trim();
        if !name.is_empty() {
            return name.to_owned();
        }
    }
    if let Some(option) = entry.options.first() {
        let name = option.name.trim();
        if !name.is_empty() {
            return name.to_owned();
        }
    }
    UNTITLED_KEY.to_owned()
}

#[derive(Debug, Default)]
struct VersionAcc {
    release: String,
    lifecycle: String,
    published: String,
    notes: String,
    options: Vec<DownloadOption>,
}

/// Accumulator for all raw entries sharing one dedup key.
#[derive(Debug)]
pub(crate) struct DocumentAcc {
    key: String,
    document_number: String,
    api_name: String,
    description: String,
    categories: BTreeSet<String>,
    contexts: BTreeSet<String>,
    lifecycle: BTreeSet<String>,
    versions: BTreeMap<String, VersionAcc>,
}

impl DocumentAcc {
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn new(key: String) -> Self {
        Self {
            key,
            document_number: String::new(),
            api_name: String::new(),
            description: String::new(),
            categories: BTreeSet::new(),
            contexts: BTreeSet::new(),
            lifecycle: BTreeSet::new(),
            versions: BTreeMap::new(),
        }
    }

    /// Fold one raw entry, seen under `category`, into this accumulator.
    pub(crate) fn fold(&mut self, category: &str, entry: &RawEntry) {
        first_wins(&mut self.document_number, &entry.document_number);
        if let Some(api) = &entry.api {
            first_wins(&mut self.api_name, &api.name);
            first_wins(&mut self.description, &api.description);
        }

        let category = category.trim();
        if !category.is_empty() {
            self.categories.insert(category.to_owned());
        }
        for tag in split_tags(&entry.context) {
            self.contexts.insert(tag.to_owned());
        }
        let lifecycle = entry.lifecycle.trim();
        if !lifecycle.is_empty() {
            self.lifecycle.insert(lifecycle.to_owned());
        }

        let label = {
            let label = entry.version.trim();
            if label.is_empty() { UNVERSIONED_LABEL } else { label }
        };
        let version = self.versions.entry(label.to_owned()).or_default();
        first_wins(&mut version.release, &entry.release);
        first_wins(&mut version.lifecycle, &entry.lifecycle);
        first_wins(&mut version.published, &entry.published);
        first_wins(&mut version.notes, &entry.notes);
        for raw in &entry.options {
            let name = raw.name.trim();
            version.options.push(DownloadOption {
                option_type: raw.option_type.trim().to_owned(),
                name: if name.is_empty() { DEFAULT_OPTION_NAME.to_owned() } else { name.to_owned() },
                url: raw.url.trim().to_owned(),
                default: raw.default,
                icon: raw.icon.trim().to_owned(),
            });
        }
    }

    /// Finish the accumulator into a `Document` under the given unique id.
    pub(crate) fn finish(self, id: String) -> Document {
        let mut versions: Vec<Version> = self
            .versions
            .into_iter()
            .map(|(label, acc)| {
                let mut options = acc.options;
                options.sort_by(|a, b| {
                    a.option_type
                        .to_lowercase()
                        .cmp(&b.option_type.to_lowercase())
                        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                });
                Version {
                    published_ts: parse_published_ms(&acc.published),
                    label,
                    release: acc.release,
                    lifecycle: acc.lifecycle,
                    published: acc.published,
                    notes: acc.notes,
                    options,
                }
            })
            .collect();
        versions.sort_by(|a, b| {
            b.published_ts
                .cmp(&a.published_ts)
                .then_with(|| b.label.to_lowercase().cmp(&a.label.to_lowercase()))
        });

        let option_types: Vec<String> = versions
            .iter()
            .flat_map(|v| v.options.iter())
            .map(|o| o.option_type.clone())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let primary_type = option_types.first().cloned().unwrap_or_default();
        let latest_published = versions.iter().map(|v| v.published_ts).max().unwrap_or(0);

        let mut document_number = self.document_number;
        if document_number.is_empty() && self.key == UNTITLED_KEY {
            document_number = UNTITLED_KEY.to_owned();
        }

        let search_index = build_search_index(
            &document_number,
            &self.api_name,
            &self.description,
            &self.categories,
            &self.contexts,
            &self.lifecycle,
            &versions,
            &option_types,
        );

        Document {
            id,
            key: self.key,
            document_number,
            api_name: self.api_name,
            description: self.description,
            categories: self.categories,
            contexts: self.contexts,
            lifecycle: self.lifecycle,
            versions,
            option_types,
            primary_type,
            latest_published,
            search_index,
        }
    }
}

#[expect(clippy::too_many_arguments, reason = "flat field list mirrors the indexed fields")]
fn build_search_index(
    document_number: &str,
    api_name: &str,
    description: &str,
    categories: &BTreeSet<String>,
    contexts: &BTreeSet<String>,
    lifecycle: &BTreeSet<String>,
    versions: &[Version],
    option_types: &[String],
) -> String {
    let mut parts: Vec<String> = vec![
        document_number.to_owned(),
        api_name.to_owned(),
        strip_html(description),
    ];
    parts.extend(categories.iter().cloned());
    parts.extend(contexts.iter().cloned());
    parts.extend(lifecycle.iter().cloned());
    parts.extend(versions.iter().map(|v| v.label.clone()));
    parts.extend(option_types.iter().cloned());
    parts.retain(|p| !p.trim().is_empty());
    parts.join(" ").to_lowercase()
}

/// Allocates unique slugs across one load. On collision the suffix is seeded
/// by the number of slugs already handed out for the base, then incremented
/// until unique.
#[derive(Debug, Default)]
pub(crate) struct SlugAllocator {
    used: HashSet<String>,
    counts: HashMap<String, usize>,
}

impl SlugAllocator {
    pub(crate) fn allocate(&mut self, base: &str) -> String {
        let mut n = self.counts.get(base).copied().unwrap_or(0);
        let mut candidate =
            if n == 0 { base.to_owned() } else { format!("{base}-{n}") };
        while !self.used.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.counts.insert(base.to_owned(), n + 1);
        candidate
    }
}

//! Filter, sort, and pagination over the normalized document collection.
//!
//! Given a [`FilterState`], produces the visible subset (conjunction of
//! category membership, context membership, and literal substring search),
//! applies the selected sort order with stable tie-breaks, and slices the
//! result into fixed-size pages. No fuzzy matching, no tokenization.

use serde::{Deserialize, Serialize};
use specdex_core::Document;

/// User-selectable sort order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// API name ascending, then document number ascending.
    #[default]
    Name,
    /// Primary option type ascending, then API name ascending.
    Type,
    /// Latest published timestamp descending, then API name ascending.
    Date,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Date => "date",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "type" => Ok(Self::Type),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// The current category/domain/search/sort selection.
///
/// `None` in `category`/`domain` means "all". The search term is stored
/// lowercased; matching is literal substring containment on the document's
/// search index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<String>,
    pub domain: Option<String>,
    search_term: String,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Set the search term, trimming and lowercasing it.
    pub fn set_search(&mut self, raw: &str) {
        self.search_term = raw.trim().to_lowercase();
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether a document survives this filter. All legs must hold.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(category) = &self.category
            && !doc.categories.contains(category)
        {
            return false;
        }
        if let Some(domain) = &self.domain
            && !doc.contexts.contains(domain)
        {
            return false;
        }
        self.search_term.is_empty() || doc.search_index.contains(&self.search_term)
    }
}

/// Filter and sort the collection per the given state.
#[must_use]
pub fn apply_filters(documents: &[Document], filters: &FilterState) -> Vec<Document> {
    let mut visible: Vec<Document> =
        documents.iter().filter(|doc| filters.matches(doc)).cloned().collect();
    sort_documents(&mut visible, filters.sort_key);
    visible
}

/// Stable in-place sort per the selected key; string legs compare
/// case-insensitively.
fn sort_documents(documents: &mut [Document], key: SortKey) {
    match key {
        SortKey::Name => documents.sort_by(|a, b| {
            a.api_name
                .to_lowercase()
                .cmp(&b.api_name.to_lowercase())
                .then_with(|| {
                    a.document_number.to_lowercase().cmp(&b.document_number.to_lowercase())
                })
        }),
        SortKey::Type => documents.sort_by(|a, b| {
            a.primary_type
                .to_lowercase()
                .cmp(&b.primary_type.to_lowercase())
                .then_with(|| a.api_name.to_lowercase().cmp(&b.api_name.to_lowercase()))
        }),
        SortKey::Date => documents.sort_by(|a, b| {
            b.latest_published
                .cmp(&a.latest_published)
                .then_with(|| a.api_name.to_lowercase().cmp(&b.api_name.to_lowercase()))
        }),
    }
}

/// One resolved page over a filtered collection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based page number as requested (not clamped).
    pub page: usize,
    /// Total pages; at least 1 even for an empty collection.
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

/// Pagination arithmetic over a collection of `len` items.
///
/// A page beyond the end yields an empty slice rather than clamping; the
/// reset-to-page-1 policy on filter changes lives in the app reducer.
#[must_use]
pub fn paginate(len: usize, page: usize, page_size: usize) -> PageInfo {
    let page_size = page_size.max(1);
    let total_pages = len.div_ceil(page_size).max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    PageInfo { page, total_pages, start, end }
}

/// Slice the filtered collection down to the resolved page.
#[must_use]
pub fn page_slice<'a>(items: &'a [Document], info: &PageInfo) -> &'a [Document] {
    &items[info.start..info.end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use specdex_core::RawPayload;

    fn docs() -> Vec<Document> {
        let raw: RawPayload = serde_json::from_value(serde_json::json!({
            "Billing": {
                "G": [
                    {
                        "documentNumber": "TS 2",
                        "api": {"name": "Beta", "description": "charging records"},
                        "context": "retail",
                        "version": "v1",
                        "published": "2023-01-01",
                        "options": [{"type": "yaml", "name": "Spec", "url": "u"}]
                    },
                    {
                        "documentNumber": "TS 1",
                        "api": {"name": "alpha", "description": "usage data"},
                        "context": "wholesale",
                        "version": "v1",
                        "published": "2024-06-15",
                        "options": [{"type": "json", "name": "Spec", "url": "u"}]
                    }
                ]
            },
            "Charging": {
                "G": [
                    {
                        "documentNumber": "TS 3",
                        "api": {"name": "Gamma", "description": "foo bar"},
                        "context": "retail, wholesale",
                        "version": "v2",
                        "published": "2022-05-05"
                    }
                ]
            }
        }))
        .unwrap();
        specdex_normalize::normalize(&raw)
    }

    #[test]
    fn filters_compose_conjunctively() {
        let docs = docs();
        let mut filters = FilterState {
            category: Some("Charging".to_owned()),
            domain: Some("retail".to_owned()),
            ..FilterState::default()
        };
        filters.set_search("foo");
        let visible = apply_filters(&docs, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].api_name, "Gamma");

        filters.set_search("usage");
        assert!(apply_filters(&docs, &filters).is_empty());
    }

    #[test]
    fn search_is_literal_substring_on_the_index() {
        let docs = docs();
        let mut filters = FilterState::default();
        filters.set_search("CHARGING REC");
        let visible = apply_filters(&docs, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].api_name, "Beta");
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let docs = docs();
        let visible = apply_filters(&docs, &FilterState::default());
        let names: Vec<&str> = visible.iter().map(|d| d.api_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn type_sort_puts_missing_type_first() {
        let docs = docs();
        let filters = FilterState { sort_key: SortKey::Type, ..FilterState::default() };
        let visible = apply_filters(&docs, &filters);
        // Gamma has no options, so its empty primary type sorts first.
        let names: Vec<&str> = visible.iter().map(|d| d.api_name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "alpha", "Beta"]);
    }

    #[test]
    fn date_sort_is_descending() {
        let docs = docs();
        let filters = FilterState { sort_key: SortKey::Date, ..FilterState::default() };
        let visible = apply_filters(&docs, &filters);
        let names: Vec<&str> = visible.iter().map(|d| d.api_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn sort_key_round_trips_from_str() {
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!("size".parse::<SortKey>().is_err());
    }

    #[test]
    fn pagination_arithmetic() {
        let info = paginate(25, 1, 10);
        assert_eq!((info.total_pages, info.start, info.end), (3, 0, 10));

        let info = paginate(25, 3, 10);
        assert_eq!((info.start, info.end), (20, 25));

        // exact multiple
        assert_eq!(paginate(20, 2, 10).total_pages, 2);
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let info = paginate(0, 1, 10);
        assert_eq!(info.total_pages, 1);
        assert_eq!((info.start, info.end), (0, 0));
    }

    #[test]
    fn page_beyond_end_yields_empty_slice() {
        let docs = docs();
        let visible = apply_filters(&docs, &FilterState::default());
        let info = paginate(visible.len(), 5, 10);
        assert!(page_slice(&visible, &info).is_empty());
        assert_eq!(info.page, 5);
    }
}

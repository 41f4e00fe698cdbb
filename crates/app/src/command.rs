//! Messages consumed by the app reducer.

use specdex_core::Document;
use specdex_query::SortKey;

use crate::{Route, Theme};

/// One user or host event, applied by [`crate::AppState::apply`].
#[derive(Debug, Clone)]
pub enum Command {
    /// Select a category filter; `None` means "all".
    SetCategory(Option<String>),
    /// Select a context/domain filter; `None` means "all".
    SetDomain(Option<String>),
    /// Replace the search term (lowercased by the reducer).
    SetSearch(String),
    /// Select the sort order.
    SetSort(SortKey),
    /// Jump to a 1-based page.
    SetPage(usize),
    NextPage,
    PrevPage,
    /// Programmatic navigation to a route.
    Navigate(Route),
    /// The host reported a fragment change (back/forward navigation).
    FragmentChanged(String),
    SetTheme(Theme),
    /// A payload load finished and was normalized.
    IndexLoaded { documents: Vec<Document>, via_fallback: bool },
    /// Every payload source failed.
    LoadFailed(String),
}

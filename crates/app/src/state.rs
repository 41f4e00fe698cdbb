//! The command reducer and render snapshot.
//!
//! All state mutation flows through [`AppState::apply`]; the view layer
//! dispatches commands and renders [`RenderModel`] snapshots. Filter, page,
//! route, and the location fragment stay consistent under the rules below:
//!
//! - any filter/sort/search change resets the page to 1 (never clamps);
//! - prev/next page moves do not re-trigger that reset;
//! - a detail route is valid only while its document exists and survives the
//!   current filter; unknown ids redirect with a notice, filtered-out ids
//!   redirect silently;
//! - the page resets on route changes only when the view type flips
//!   (index↔detail); the index page is remembered across a detail round
//!   trip so coming back restores the pre-navigation list.

use std::collections::BTreeMap;

use serde::Serialize;
use specdex_core::{DEFAULT_PAGE_SIZE, Document};
use specdex_normalize::{category_options, context_options, document_map};
use specdex_query::{FilterState, apply_filters, page_slice, paginate};

use crate::{Command, Fragment, Route, Theme, fragment_for, parse_fragment};

/// Current status message for the view: hidden (nothing to show), loading,
/// a transient notice, or a load error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Status {
    Hidden,
    Loading,
    Notice { message: String },
    Error { message: String },
}

/// Everything the view renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct RenderModel {
    pub route: Route,
    pub status: Status,
    pub theme: Theme,
    /// Result count after filtering, before pagination.
    pub total_results: usize,
    pub page: usize,
    pub total_pages: usize,
    /// True when filters produced no matches while the catalog is loaded;
    /// distinct from the loading and error states.
    pub empty: bool,
    /// The visible page slice.
    pub items: Vec<Document>,
    /// The active document when the route is a detail view.
    pub active: Option<Document>,
    pub categories: Vec<String>,
    pub domains: Vec<String>,
}

/// The single application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    documents: Vec<Document>,
    id_map: BTreeMap<String, usize>,
    pub filters: FilterState,
    page: usize,
    /// Index page remembered while a detail view is active, so a round trip
    /// back to the index restores the pre-navigation page.
    saved_index_page: usize,
    route: Route,
    status: Status,
    theme: Theme,
    page_size: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            documents: Vec::new(),
            id_map: BTreeMap::new(),
            filters: FilterState::default(),
            page: 1,
            saved_index_page: 1,
            route: Route::Index,
            status: Status::Loading,
            theme: Theme::default(),
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Derive the initial route from the fragment present at startup.
    pub fn init_route(&mut self, fragment: &mut dyn Fragment) {
        let route = parse_fragment(&fragment.get());
        self.enter(route, fragment);
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply one command. The fragment argument is the host location bar,
    /// kept in sync bidirectionally.
    pub fn apply(&mut self, command: Command, fragment: &mut dyn Fragment) {
        match command {
            Command::SetCategory(category) => {
                self.filters.category = category;
                self.after_filter_change(fragment);
            },
            Command::SetDomain(domain) => {
                self.filters.domain = domain;
                self.after_filter_change(fragment);
            },
            Command::SetSearch(raw) => {
                self.filters.set_search(&raw);
                self.after_filter_change(fragment);
            },
            Command::SetSort(sort_key) => {
                self.filters.sort_key = sort_key;
                self.page = 1;
                self.saved_index_page = 1;
            },
            Command::SetPage(page) => self.page = page.max(1),
            Command::NextPage => {
                if self.page < self.current_total_pages() {
                    self.page += 1;
                }
            },
            Command::PrevPage => {
                if self.page > 1 {
                    self.page -= 1;
                }
            },
            Command::Navigate(route) => self.navigate(route, fragment),
            Command::FragmentChanged(raw) => {
                let route = parse_fragment(&raw);
                self.enter(route, fragment);
            },
            Command::SetTheme(theme) => self.theme = theme,
            Command::IndexLoaded { documents, via_fallback } => {
                self.id_map = document_map(&documents);
                self.documents = documents;
                self.status = if via_fallback {
                    Status::Notice { message: "index loaded via fallback source".to_owned() }
                } else {
                    Status::Hidden
                };
                // The collection was rebuilt; the active route must still hold.
                let current = self.route.clone();
                self.enter(current, fragment);
            },
            Command::LoadFailed(message) => {
                tracing::warn!(%message, "index load failed");
                self.status = Status::Error { message };
            },
        }
    }

    /// Snapshot the state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> RenderModel {
        let visible = apply_filters(&self.documents, &self.filters);
        let info = paginate(visible.len(), self.page, self.page_size);
        let items = page_slice(&visible, &info).to_vec();
        let active = match &self.route {
            Route::Detail { id } => {
                self.id_map.get(id).map(|&ix| self.documents[ix].clone())
            },
            Route::Index => None,
        };
        RenderModel {
            route: self.route.clone(),
            status: self.status.clone(),
            theme: self.theme,
            total_results: visible.len(),
            page: info.page,
            total_pages: info.total_pages,
            empty: visible.is_empty()
                && !matches!(self.status, Status::Loading | Status::Error { .. }),
            items,
            active,
            categories: category_options(&self.documents),
            domains: context_options(&self.documents),
        }
    }

    fn current_total_pages(&self) -> usize {
        let visible = apply_filters(&self.documents, &self.filters);
        paginate(visible.len(), self.page, self.page_size).total_pages
    }

    /// Filter/search changes reset to page 1 (a deliberate choice, not a
    /// clamp) and re-check that an active detail document still survives.
    fn after_filter_change(&mut self, fragment: &mut dyn Fragment) {
        self.page = 1;
        self.saved_index_page = 1;
        let current = self.route.clone();
        self.enter(current, fragment);
    }

    /// Programmatic navigation. Writing an identical fragment produces no
    /// host event, so state always updates directly here; a host-delivered
    /// fragment event for the same target re-resolves to the same state.
    fn navigate(&mut self, route: Route, fragment: &mut dyn Fragment) {
        if parse_fragment(&fragment.get()) != route {
            fragment.set(&fragment_for(&route));
        }
        self.enter(route, fragment);
    }

    /// Resolve a requested route against the document map and the current
    /// filter, then commit it and sync the fragment.
    fn enter(&mut self, route: Route, fragment: &mut dyn Fragment) {
        let requested = route.clone();
        let resolved = match route {
            Route::Index => Route::Index,
            Route::Detail { id } => match self.id_map.get(&id) {
                None => {
                    self.status =
                        Status::Notice { message: format!("document not found: {id}") };
                    Route::Index
                },
                Some(&ix) => {
                    if self.filters.matches(&self.documents[ix]) {
                        Route::Detail { id }
                    } else {
                        // The user's own filter excluded it; redirect silently.
                        Route::Index
                    }
                },
            },
        };

        if resolved.is_detail() != self.route.is_detail() {
            if resolved.is_detail() {
                self.saved_index_page = self.page;
                self.page = 1;
            } else {
                self.page = self.saved_index_page;
            }
        }
        let redirected = resolved != requested;
        self.route = resolved;

        // Only a redirect rewrites the fragment; otherwise the host's
        // location (including a startup deep link) is left alone.
        if redirected && parse_fragment(&fragment.get()) != self.route {
            fragment.set(&fragment_for(&self.route));
        }
    }
}

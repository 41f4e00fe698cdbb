//! URL-fragment routing.
//!
//! The entire routing surface: `#/` (or empty) is the index view,
//! `#/document/<urlencoded-id>` is the detail view. Anything else falls back
//! to the index; an unparsable fragment is never an error.

use serde::{Deserialize, Serialize};

/// The parsed view target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Route {
    Index,
    Detail { id: String },
}

impl Route {
    /// Convenience constructor for a detail route.
    pub fn detail(id: impl Into<String>) -> Self {
        Self::Detail { id: id.into() }
    }

    #[must_use]
    pub const fn is_detail(&self) -> bool {
        matches!(self, Self::Detail { .. })
    }
}

/// Parse a URL fragment into a route.
pub fn parse_fragment(fragment: &str) -> Route {
    let trimmed = fragment.trim().trim_start_matches('#').trim_start_matches('/');
    if trimmed.is_empty() {
        return Route::Index;
    }
    if let Some(encoded) = trimmed.strip_prefix("document/") {
        let id = urlencoding::decode(encoded)
            .map_or_else(|_| encoded.to_owned(), |decoded| decoded.into_owned());
        if !id.is_empty() {
            return Route::Detail { id };
        }
    }
    Route::Index
}

/// Format a route back into its canonical URL fragment.
#[must_use]
pub fn fragment_for(route: &Route) -> String {
    match route {
        Route::Index => "#/".to_owned(),
        Route::Detail { id } => format!("#/document/{}", urlencoding::encode(id)),
    }
}

/// The host's location bar, abstracted so the core stays testable without a
/// browser-like surface.
pub trait Fragment {
    fn get(&self) -> String;
    fn set(&mut self, fragment: &str);
}

/// In-memory fragment store used by tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemFragment {
    current: String,
}

impl MemFragment {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self { current: initial.to_owned() }
    }
}

impl Fragment for MemFragment {
    fn get(&self) -> String {
        self.current.clone()
    }

    fn set(&mut self, fragment: &str) {
        self.current = fragment.to_owned();
    }
}

//! Shared constants for specdex.
//!
//! Centralizes magic values used across the normalizer, query engine,
//! and CLI so they stay in one place.

/// Number of documents shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Dedup key synthesized for entries carrying no number, name, or options.
pub const UNTITLED_KEY: &str = "Untitled";

/// Version label used when a raw entry carries no version.
pub const UNVERSIONED_LABEL: &str = "Unversioned";

/// Display name used when a download option carries no name.
pub const DEFAULT_OPTION_NAME: &str = "Download";

/// Slug used when a key normalizes to an empty string.
pub const FALLBACK_SLUG: &str = "document";

/// Environment variable naming the primary index URL.
pub const INDEX_URL_ENV: &str = "SPECDEX_INDEX_URL";

/// Environment variable holding comma-separated proxy URL templates.
pub const PROXY_TEMPLATES_ENV: &str = "SPECDEX_PROXY_TEMPLATES";

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "SPECDEX_PAGE_SIZE";

/// Environment variable overriding the preference directory (mainly for tests).
pub const CONFIG_DIR_ENV: &str = "SPECDEX_CONFIG_DIR";

/// Directory name under the platform config dir holding preferences.
pub const APP_DIR_NAME: &str = "specdex";

/// File name of the persisted theme preference.
pub const THEME_FILE_NAME: &str = "theme";

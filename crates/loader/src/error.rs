//! Typed error enum for the loader crate.

use thiserror::Error;

/// Errors from index loading.
///
/// Per-source failures are recovered locally by falling through to the next
/// source; only `AllSourcesFailed` ever reaches the user.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code} from {label}: {body}")]
    HttpStatus { label: String, code: u16, body: String },
    #[error("JSON parse error from {label}: {source}")]
    JsonParse {
        label: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("no sources configured")]
    NoSources,
    #[error("all sources failed, last error: {0}")]
    AllSourcesFailed(Box<LoaderError>),
}

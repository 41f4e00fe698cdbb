//! Index payload loader with ordered fallback sources.
//!
//! Attempts a network GET against each source in order: the primary URL
//! first, then each proxy template with the primary URL substituted in.
//! Attempts are sequential, each awaited to completion; the first successful
//! parse short-circuits the rest, and only exhausting every source surfaces
//! an error.

mod error;

use std::time::Duration;

use specdex_core::RawPayload;

pub use crate::error::LoaderError;

/// Request timeout for a single source attempt.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One fetchable source for the index payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Human-readable label used in logs and errors.
    pub label: String,
    pub url: String,
}

/// Build the ordered source chain: the primary URL, then one source per
/// proxy template.
///
/// A template containing `{url}` gets the percent-encoded primary URL
/// substituted; a template without it gets the primary URL appended as-is
/// (prefix-style proxies).
#[must_use]
pub fn source_chain(primary: &str, proxy_templates: &[String]) -> Vec<Source> {
    let mut sources =
        vec![Source { label: "primary".to_owned(), url: primary.to_owned() }];
    for (ix, template) in proxy_templates.iter().enumerate() {
        let url = if template.contains("{url}") {
            template.replace("{url}", &urlencoding::encode(primary))
        } else {
            format!("{template}{primary}")
        };
        sources.push(Source { label: format!("proxy-{}", ix + 1), url });
    }
    sources
}

/// The parsed payload plus which source produced it.
#[derive(Debug)]
pub struct LoadedIndex {
    pub payload: RawPayload,
    pub source_label: String,
    /// True when anything other than the primary source succeeded.
    pub via_fallback: bool,
}

/// Sequential-fallback loader for the index payload.
#[derive(Debug)]
pub struct PayloadLoader {
    client: reqwest::Client,
    sources: Vec<Source>,
}

impl PayloadLoader {
    /// Build a loader over the primary URL and its proxy templates.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(primary: &str, proxy_templates: &[String]) -> Result<Self, LoaderError> {
        Self::with_sources(source_chain(primary, proxy_templates))
    }

    /// Build a loader over an explicit source chain.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_sources(sources: Vec<Source>) -> Result<Self, LoaderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LoaderError::ClientInit(e.to_string()))?;
        Ok(Self { client, sources })
    }

    /// Fetch the index, falling through the source chain in order.
    ///
    /// # Errors
    /// Returns `AllSourcesFailed` wrapping the last per-source error once
    /// every source has been attempted.
    pub async fn load(&self) -> Result<LoadedIndex, LoaderError> {
        let mut last_error: Option<LoaderError> = None;

        for (ix, source) in self.sources.iter().enumerate() {
            match self.attempt(source).await {
                Ok(payload) => {
                    tracing::info!(source = %source.label, "index payload loaded");
                    return Ok(LoadedIndex {
                        payload,
                        source_label: source.label.clone(),
                        via_fallback: ix > 0,
                    });
                },
                Err(e) => {
                    tracing::warn!(source = %source.label, error = %e, "source attempt failed");
                    last_error = Some(e);
                },
            }
        }

        Err(LoaderError::AllSourcesFailed(Box::new(
            last_error.unwrap_or(LoaderError::NoSources),
        )))
    }

    async fn attempt(&self, source: &Source) -> Result<RawPayload, LoaderError> {
        let response = self.client.get(&source.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read error body".to_owned());
            return Err(LoaderError::HttpStatus {
                label: source.label.clone(),
                code: status.as_u16(),
                body,
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| LoaderError::JsonParse { label: source.label.clone(), source: e })
    }
}

//! Runtime configuration: CLI flags first, environment second.

use anyhow::{Context, Result};
use specdex_core::{
    DEFAULT_PAGE_SIZE, INDEX_URL_ENV, PAGE_SIZE_ENV, PROXY_TEMPLATES_ENV, env_list,
    env_parse_with_default,
};

/// Resolved loader and paging configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub index_url: String,
    pub proxy_templates: Vec<String>,
    pub page_size: usize,
}

impl Config {
    /// Resolve the configuration, preferring flags over environment.
    ///
    /// # Errors
    /// Fails when no index URL is available from either source.
    pub fn resolve(url_flag: Option<String>, proxy_flags: Vec<String>) -> Result<Self> {
        let index_url = url_flag
            .or_else(|| std::env::var(INDEX_URL_ENV).ok())
            .with_context(|| format!("no index URL: pass --url or set {INDEX_URL_ENV}"))?;
        let proxy_templates =
            if proxy_flags.is_empty() { env_list(PROXY_TEMPLATES_ENV) } else { proxy_flags };
        let page_size = env_parse_with_default(PAGE_SIZE_ENV, DEFAULT_PAGE_SIZE);
        Ok(Self { index_url, proxy_templates, page_size })
    }
}

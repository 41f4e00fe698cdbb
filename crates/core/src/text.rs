//! Text routines shared by the normalizer: HTML stripping, slug derivation,
//! tag splitting, and published-date parsing.
//!
//! These operate on plain strings so the core stays testable without any
//! rendering surface.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::FALLBACK_SLUG;

/// Strip HTML tags from a string, keeping only text content.
///
/// Good enough for building a search index over description/notes fields;
/// unclosed tags swallow the remainder of the string, matching the
/// everything-between-angle-brackets rule.
#[must_use]
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {},
        }
    }
    out
}

/// Derive a slug base from a dedup key: lowercase, non-alphanumeric runs
/// collapsed to a single `-`, leading/trailing separators trimmed.
///
/// An empty result falls back to a literal placeholder; uniqueness across a
/// load is the caller's concern.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if out.is_empty() { FALLBACK_SLUG.to_owned() } else { out }
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// Parse a free-form published-date string into epoch milliseconds.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS`, and date-only
/// `YYYY-MM-DD` / `YYYY/MM/DD`. Anything else (including empty) parses
/// to 0, which sorts last under descending-date order.
#[must_use]
pub fn parse_published_ms(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return dt.and_utc().timestamp_millis();
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map_or(0, |dt| dt.and_utc().timestamp_millis());
        }
    }
    0
}

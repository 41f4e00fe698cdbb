//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok().as_deref(), default)
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(var, value = %v, default = %default, "invalid env var value, using default");
                default
            },
        },
        None => default,
    }
}

/// Split a comma-separated environment value into trimmed, non-empty items.
///
/// Returns an empty list when the variable is unset or holds only separators.
#[must_use]
pub fn env_list(var: &str) -> Vec<String> {
    list_from_value(std::env::var(var).ok().as_deref())
}

fn list_from_value(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
    })
    .unwrap_or_default()
}

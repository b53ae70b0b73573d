//! Organizer id extraction from the `organizer` query parameter.

use std::sync::OnceLock;

use regex::Regex;

static ORGANIZER_RE: OnceLock<Regex> = OnceLock::new();

fn organizer_re() -> &'static Regex {
    // Trailing alphanumeric path segment, optionally followed by `/` and a query string.
    ORGANIZER_RE.get_or_init(|| {
        Regex::new(r"([0-9a-zA-Z]+)/?(\?[^?]+)?$").expect("organizer pattern is valid")
    })
}

/// Value of the `organizer` parameter in a raw query string.
///
/// Blank values are ignored and the last remaining occurrence wins.
pub fn organizer_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, value)| key == "organizer" && !value.is_empty())
        .last()
        .map(|(_, value)| value.into_owned())
}

/// Organizer id from a bare id or an organizer page URL.
pub fn organizer_id(value: &str) -> Option<String> {
    organizer_re()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Organizer id from a raw query string.
pub fn organizer_from_query(query: &str) -> Option<String> {
    organizer_param(query).and_then(|value| organizer_id(&value))
}

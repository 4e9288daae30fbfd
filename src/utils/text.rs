//! Small text helpers for page rendering.

/// Returns at most `max_chars` characters of `s`, cut on a char boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Returns `text` trimmed, or `fallback` when it is blank.
pub fn or_fallback<'a>(text: Option<&'a str>, fallback: &'a str) -> &'a str {
    text.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(fallback)
}

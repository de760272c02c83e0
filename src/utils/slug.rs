//! Slug derivation for post URLs and file names.

/// Convert a title (or a client-supplied slug) into a URL-safe token:
/// spaces become hyphens, anything outside `[A-Za-z0-9_-]` is stripped,
/// and the result is lower-cased.
///
/// Titles here are expected to be ASCII; non-ASCII characters are dropped
/// rather than transliterated.
pub fn slugify(text: &str) -> String {
    text.replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

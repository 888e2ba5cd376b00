//! Title → directory name normalization

/// Slug used when a title has no ASCII letters or digits
pub const UNTITLED: &str = "untitled";

/// Normalize a title into a filesystem-safe directory name
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into one
/// `-`, and strips separators from both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        UNTITLED.to_string()
    } else {
        slug
    }
}

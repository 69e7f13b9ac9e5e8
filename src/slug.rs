/// Substituted when a name has no usable characters left.
pub const FALLBACK_SLUG: &str = "default";

/// Turn a project directory name into a URL-safe slug.
///
/// Whitespace and underscores become hyphens, anything outside `[a-z0-9-]`
/// is dropped, hyphen runs collapse to one and edge hyphens are trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        }
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

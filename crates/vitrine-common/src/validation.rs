//! Slug and icon validation
//!
//! Slugs are the leftmost DNS label of a tenant's hostname: lowercase
//! alphanumerics and hyphens, bounded by `SLUG_MAX_LENGTH`. The policy is
//! strict for writers: a caller must submit an already-normalized slug, and
//! provisioning rejects anything `normalize_slug` would change. The read
//! path normalizes defensively instead of rejecting.

use std::sync::LazyLock;

use crate::{ICON_MAX_LENGTH, SLUG_MAX_LENGTH};

/// Emoji pattern for icon validation.
///
/// Compilation may fail depending on the regex engine's Unicode property
/// support; `is_valid_icon` falls back to a plain length check in that case
/// rather than failing validation outright.
static EMOJI_PATTERN: LazyLock<Result<regex::Regex, regex::Error>> =
    LazyLock::new(|| regex::Regex::new(r"\p{Emoji}"));

/// Normalize a candidate slug: lowercase, keep only `[a-z0-9-]`.
pub fn normalize_slug(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Whether a slug is already in normalized form and within length bounds.
pub fn is_normalized_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= SLUG_MAX_LENGTH && normalize_slug(slug) == slug
}

/// Validate a tenant icon: at most `ICON_MAX_LENGTH` characters, expected to
/// contain an emoji.
///
/// If the emoji pattern itself failed to compile, any string of 1..=10
/// characters is accepted. A pattern-engine limitation must never reject an
/// otherwise plausible icon.
pub fn is_valid_icon(icon: &str) -> bool {
    let char_count = icon.chars().count();
    if char_count > ICON_MAX_LENGTH {
        return false;
    }

    match &*EMOJI_PATTERN {
        Ok(pattern) => {
            if pattern.is_match(icon) {
                return true;
            }
            char_count >= 1 && char_count <= ICON_MAX_LENGTH
        }
        Err(_) => char_count >= 1 && char_count <= ICON_MAX_LENGTH,
    }
}

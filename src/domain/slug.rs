// Copyright (c) 2025 - Cowboy AI, Inc.
//! Slug normalization
//!
//! A slug is the URL-safe identifier NetBox stores next to a display name.
//!
//! Rules:
//! - ASCII letters are lowercased, ASCII digits and `_` are kept
//! - every run of other ASCII characters (spaces, punctuation, `-`) becomes one `-`
//! - text is NFKD-decomposed first, so accented letters keep their base
//!   letter; whatever is still non-ASCII afterwards is dropped
//! - leading and trailing `-` / `_` are stripped
//!
//! ```rust
//! use netbox_site_provisioner::domain::slugify;
//!
//! assert_eq!(slugify("foo12"), "foo12");
//! assert_eq!(slugify("Berlin DC 2"), "berlin-dc-2");
//! assert_eq!(slugify("foo12_a1"), "foo12_a1");
//! assert_eq!(slugify("São Paulo"), "sao-paulo");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Normalize a display name into a slug
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for ch in value.nfkd() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii() {
            pending_separator = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Check whether a string is already in slug form
pub fn is_slug(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}

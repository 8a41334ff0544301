//! Language Detection
//!
//! Normalizes environment locale tags to base subtags and clamps them to
//! the set of languages the widget ships translations for.

/// Languages the widget ships content for.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "es", "fr", "pt", "ar"];

/// Used whenever detection fails or lands outside the supported set.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Strip region and encoding from a locale tag.
///
/// Accepts both BCP-47 and POSIX shapes: `en-US`, `en_US.UTF-8`,
/// and `fr-CA` all reduce to their base subtag.
pub fn base_subtag(tag: &str) -> String {
    let tag = tag.split('.').next().unwrap_or(tag);
    let tag = tag.split(['-', '_']).next().unwrap_or(tag);
    tag.trim().to_ascii_lowercase()
}

/// Normalize `tag` and return it iff supported, else the fallback.
pub fn supported_language(tag: &str) -> String {
    let base = base_subtag(tag);
    if SUPPORTED_LANGUAGES.contains(&base.as_str()) {
        base
    } else {
        FALLBACK_LANGUAGE.to_string()
    }
}

/// Detect the environment's preferred locale tag.
///
/// Embedders with access to richer signals (e.g. a browser's language
/// list) can pass their own tag to the store instead.
pub fn detect_locale() -> String {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default()
}

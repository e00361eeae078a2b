//! Slug generation for post filenames.

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Converts a title to a filesystem-safe stem.
///
/// - Drops every character that is not a word character (letters of any
///   script, digits, underscore), whitespace, or a hyphen
/// - Replaces each run of whitespace with a single hyphen
/// - Converts to lowercase
///
/// Hyphens are neither collapsed nor trimmed, there is no length cap, and an
/// all-punctuation title yields the empty string.
///
/// # Examples
///
/// ```
/// use notion_sync::infra::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My Post! 2024"), "my-post-2024");
/// assert_eq!(sanitize_filename("日志: 开始"), "日志-开始");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let kept = DISALLOWED.replace_all(title, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&kept, "-");
    hyphenated.to_lowercase()
}

/// Generates a post filename from a title: `{slug}.md`.
///
/// # Examples
///
/// ```
/// use notion_sync::infra::generate_filename;
///
/// assert_eq!(generate_filename("API Design"), "api-design.md");
/// ```
pub fn generate_filename(title: &str) -> String {
    format!("{}.md", sanitize_filename(title))
}

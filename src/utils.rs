//! Text normalization and small helpers shared by the extractor and the outputs.
//!
//! This module provides:
//! - [`clean_text`]: the headline cleaning rule applied to every candidate title
//! - [`char_prefix`]: character-aware prefixes for the near-duplicate guard
//! - [`truncate_for_log`]: safe truncation of long (often Cyrillic) strings for tracing
//! - [`clock_time`]: the "now" display time used when markup carries no time
//! - [`ensure_parent_dir`]: directory preparation for file exports

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;
use tracing::{debug, instrument};

/// Everything outside word characters, Cyrillic, whitespace and `, . : ; ! ? - ( ) "`.
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^\w\s\x{0400}-\x{04FF},.:;!?\-()"]"#).expect("valid disallowed-chars regex")
});
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalize raw anchor/heading text into a display title.
///
/// Characters outside the allow-list are dropped first, then every whitespace
/// run (newlines and tabs included) becomes a single space and the result is
/// trimmed. Dropping before collapsing keeps the function idempotent: a
/// removed `«` between two spaces cannot leave a double space behind.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  «Новость»\n\tдня  "), "Новость дня");
/// ```
pub fn clean_text(raw: &str) -> String {
    let kept = DISALLOWED_CHARS.replace_all(raw, "");
    WHITESPACE_RUN.replace_all(&kept, " ").trim().to_string()
}

/// Length of a cleaned title as the extractor measures it (Unicode scalar values).
pub fn title_len(title: &str) -> usize {
    title.chars().count()
}

/// The first `n` characters of `s` (the whole string when it is shorter).
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number of
/// dropped bytes appended. The cut always lands on a character boundary.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = char_prefix(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}

/// Current local wall-clock time as `HH:MM`.
pub fn clock_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Make sure the directory that will hold `path` exists.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            debug!(dir = %parent.display(), "Export directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

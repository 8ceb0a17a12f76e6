//! Filename normalization to lowercase ASCII snake case.
//!
//! The steps run in a fixed order; changing it changes results (for
//! example, `-` must become `_` before the final character filter removes
//! it).

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Base name used when sanitizing leaves nothing usable.
pub const PLACEHOLDER_STEM: &str = "unnamed";

static SEPARATOR_RUNS: OnceLock<Regex> = OnceLock::new();
static DISALLOWED: OnceLock<Regex> = OnceLock::new();

fn separator_runs() -> &'static Regex {
    SEPARATOR_RUNS.get_or_init(|| Regex::new(r"[\s\-]+").unwrap())
}

fn disallowed() -> &'static Regex {
    DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9._]+").unwrap())
}

/// Rewrites a filename (extension included) into `[a-z0-9._]` form.
///
/// 1. lowercase everything
/// 2. collapse runs of whitespace and hyphens into one `_`
/// 3. NFKD-decompose and drop every non-ASCII code point
/// 4. remove anything outside `[a-z0-9._]`
///
/// A result that is empty or only dots becomes [`PLACEHOLDER_STEM`]; a
/// result whose base name vanished (`.jpg`) gets it prepended.
///
/// # Examples
///
/// ```
/// use mediatidy::sanitize::sanitize_filename;
///
/// assert_eq!(sanitize_filename("IMG 0001 - café.JPG"), "img_0001_cafe.jpg");
/// assert_eq!(sanitize_filename("東京.mp4"), "unnamed.mp4");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let lowered = name.to_lowercase();
    let underscored = separator_runs().replace_all(&lowered, "_");
    let ascii: String = underscored.nfkd().filter(char::is_ascii).collect();
    let cleaned = disallowed().replace_all(&ascii, "").into_owned();

    if cleaned.trim_matches('.').is_empty() {
        PLACEHOLDER_STEM.to_string()
    } else if cleaned.starts_with('.') {
        format!("{}{}", PLACEHOLDER_STEM, cleaned)
    } else {
        cleaned
    }
}

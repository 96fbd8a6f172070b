//! Input validation helpers
//!
//! Centralized text length constants, the name normalisation used for
//! duplicate detection, and the sanitiser applied to snapshots read back
//! from storage.

use shared::error::{AppError, AppResult};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// ── Text length limits ──────────────────────────────────────────────

/// Friend, party, restaurant and menu item names
pub const MAX_NAME_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

/// Trim a required name and check it is non-empty and within the limit.
pub fn validate_name(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("Please enter a {field}")));
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {MAX_NAME_LEN})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Comparison key for names: case-folded, diacritics stripped, compatibility
/// normalised, surrounding whitespace trimmed and inner runs collapsed.
///
/// `"  Crème Brûlée "` and `"creme brulee"` share a key.
pub fn normalize_name(input: &str) -> String {
    let stripped: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether two names collide under [`normalize_name`]
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Clean free text read from storage: strip control characters, trim, and
/// cap the length at `max_len` characters.
pub fn sanitize_text(value: &str, max_len: usize) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .chars()
        .take(max_len)
        .collect::<String>()
        .trim_end()
        .to_string()
}

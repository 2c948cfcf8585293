//! Text normalization — strips formatting noise so that superficially
//! different copies of the same question compare equal.

use qb_core::QuestionOption;
use regex::Regex;
use std::sync::LazyLock;

// A lone leading ASCII letter is always treated as an option label, with or
// without a `、`/`.` separator.
static RE_OPTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\s*[、.]?\s*").unwrap());
static RE_TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。；？！,.!?;]$").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize question text: strip one option-label prefix, one trailing
/// punctuation character, and collapse whitespace runs (including non-breaking
/// forms) to single ASCII spaces. Case is deliberately left untouched so that
/// records differing only in case stay distinct.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let stripped = RE_OPTION_PREFIX.replace(trimmed, "");
    let stripped = RE_TRAILING_PUNCT.replace(&stripped, "");
    RE_WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Effective display text of an option: normalized `text` when present and
/// non-empty, else normalized `image`. Options with neither contribute
/// nothing to a signature.
pub fn option_text(option: &QuestionOption) -> String {
    match option.text.as_deref() {
        Some(text) if !text.is_empty() => normalize(text),
        _ => match option.image.as_deref() {
            Some(image) if !image.is_empty() => normalize(image),
            _ => String::new(),
        },
    }
}

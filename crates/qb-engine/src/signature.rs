//! Order-independent content fingerprints.

use qb_core::QuestionRecord;

use crate::normalize::{normalize, option_text};

/// Joiner between sorted option texts in the digest input. Not expected to
/// occur in natural question text.
const OPTION_SEPARATOR: &str = "||";

/// Fingerprint of a record's normalized content: MD5 hex digest of the
/// normalized title followed by the sorted, normalized option texts. Option
/// order never affects the result; empty options contribute nothing.
pub fn signature(record: &QuestionRecord) -> String {
    let title = normalize(record.title.as_deref().unwrap_or(""));
    let mut texts: Vec<String> = record
        .options
        .iter()
        .map(option_text)
        .filter(|text| !text.is_empty())
        .collect();
    texts.sort();
    let input = format!("{title}{}", texts.join(OPTION_SEPARATOR));
    format!("{:x}", md5::compute(input.as_bytes()))
}

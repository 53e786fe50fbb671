//! Pronunciation lexicon
//!
//! Applies per-voice replacement rules before synthesis so domain terms and
//! names are spoken the way the user spelled them out. Matching is
//! case-insensitive and bound to whole words.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// One lexicon rule: speak `from` as `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationEntry {
    pub from: String,
    pub to: String,
}

impl PronunciationEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Replace every whole-word occurrence of each entry's source text
pub fn apply_pronunciation(text: &str, entries: &[PronunciationEntry]) -> String {
    let mut result = text.to_string();
    for entry in entries {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(&entry.from));
        // the source text is escaped, so the pattern always compiles
        if let Ok(re) = Regex::new(&pattern) {
            result = re
                .replace_all(&result, NoExpand(entry.to.as_str()))
                .into_owned();
        }
    }
    result
}

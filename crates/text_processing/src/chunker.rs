//! Sentence chunker
//!
//! Splits long text into bounded units for per-unit model invocation,
//! breaking only at sentence ends. A single sentence longer than the budget
//! becomes its own oversized chunk; favoring readable prosody boundaries over
//! strict length compliance is accepted behavior here, not a bug.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default character budget per chunk
pub const DEFAULT_MAX_CHARS: usize = 400;

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split text into chunks of at most `max_chars` characters on sentence ends
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();

    // split after the terminal punctuation; the delimiter stays attached to
    // the preceding sentence and the whitespace run is consumed
    let mut sentences: Vec<&str> = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_END_RE.find_iter(text) {
        let split_at = boundary.start() + 1;
        sentences.push(&text[start..split_at]);
        start = boundary.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for sentence in sentences {
        if sentence.trim().is_empty() {
            continue;
        }
        let would_exceed =
            current.chars().count() + sentence.chars().count() + 1 > max_chars;
        if would_exceed && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
        } else if current.is_empty() {
            current.push_str(sentence);
        } else {
            current.push(' ');
            current.push_str(sentence);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

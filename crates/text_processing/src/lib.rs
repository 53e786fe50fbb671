//! Text processing for the VoiceLab synthesis pipeline
//!
//! Turns lightly-marked-up text into ordered synthesis input:
//! - Markup parsing (flat string mode and typed segment mode)
//! - Reversible break encoding for plain-string boundaries
//! - Style hint aggregation into a synthesis instruction
//! - Sentence-boundary chunking under a character budget
//! - Pronunciation lexicon replacement

pub mod breaks;
pub mod chunker;
pub mod markup;
pub mod pronunciation;
pub mod style;

pub use breaks::{break_to_seconds, decode_breaks, encode_break, BreakUnit};
pub use chunker::{chunk_text, DEFAULT_MAX_CHARS};
pub use markup::{parse, parse_segments, Hint, HintKind, Segment};
pub use pronunciation::{apply_pronunciation, PronunciationEntry};
pub use style::aggregate_hints;

//! Break codec
//!
//! Pause information has to survive transport through interfaces that only
//! carry plain strings. A break is wrapped in a fixed sentinel token on the
//! way out and decoded back into a pause-aware unit list on the way in; the
//! duration string itself travels unchanged so the round trip is loss-free.

use once_cell::sync::Lazy;
use regex::Regex;

use voicelab_core::{Error, Result};

/// Opens a break sentinel token
pub const BREAK_SENTINEL_PREFIX: &str = "[[BREAK:";
/// Closes a break sentinel token
pub const BREAK_SENTINEL_SUFFIX: &str = "]]";

static SENTINEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[BREAK:(.*?)\]\]").unwrap());

/// One decoded unit of sentinel-bearing text, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakUnit {
    /// A run of plain text between sentinels
    Text(String),
    /// A pause with its raw duration string
    Break(String),
}

/// Wrap a raw duration string in the break sentinel
///
/// A single space on each side keeps the token from gluing onto adjacent
/// words, which would confuse sentence and word boundary detection.
pub fn encode_break(raw_duration: &str) -> String {
    format!(" {BREAK_SENTINEL_PREFIX}{raw_duration}{BREAK_SENTINEL_SUFFIX} ")
}

/// Split sentinel-bearing text into ordered text and break units
pub fn decode_breaks(text: &str) -> Vec<BreakUnit> {
    let mut units = Vec::new();
    let mut last_end = 0;
    for caps in SENTINEL_RE.captures_iter(text) {
        let whole = caps.get(0).expect("match always has a full capture");
        if whole.start() > last_end {
            units.push(BreakUnit::Text(text[last_end..whole.start()].to_string()));
        }
        units.push(BreakUnit::Break(caps[1].to_string()));
        last_end = whole.end();
    }
    if last_end < text.len() {
        units.push(BreakUnit::Text(text[last_end..].to_string()));
    }
    units
}

/// Resolve a raw break duration string to seconds
///
/// Accepts `<number>ms` and `<number>s`, case-insensitive, surrounding
/// whitespace ignored. Anything else is rejected rather than guessed at.
pub fn break_to_seconds(raw: &str) -> Result<f64> {
    let value = raw.trim().to_ascii_lowercase();
    let malformed = || Error::MalformedDuration {
        value: value.clone(),
    };
    if let Some(number) = value.strip_suffix("ms") {
        let millis: f64 = number.parse().map_err(|_| malformed())?;
        Ok(millis / 1000.0)
    } else if let Some(number) = value.strip_suffix('s') {
        number.parse().map_err(|_| malformed())
    } else {
        Err(malformed())
    }
}

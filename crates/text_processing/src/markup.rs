//! Markup parser
//!
//! Recognizes a restricted tag vocabulary inside otherwise plain text:
//! `<break time="..."/>`, `<prosody rate="slow|fast">...</prosody>` and
//! `<emphasis level="moderate|strong">...</emphasis>`. Everything else in
//! angle brackets is stripped. Malformed markup never aborts synthesis; it
//! degrades to plain text.
//!
//! Two output modes:
//! - [`parse`] flattens to a plain string (breaks become sentinel tokens) plus
//!   the ordered hint list, for callers that only carry strings.
//! - [`parse_segments`] produces the typed segment sequence with the active
//!   style stack resolved per text run.

use once_cell::sync::Lazy;
use regex::Regex;

use voicelab_core::{Emphasis, Rate, Result};

use crate::breaks::{break_to_seconds, encode_break};

/// One recognized markup effect, in the order the transforms encountered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub kind: HintKind,
    pub value: String,
}

/// The markup construct a hint was recorded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Break,
    Prosody,
    Emphasis,
}

/// An atomic ordered unit of the parsed document
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A run of plain text with the style nesting active where it occurred
    Text {
        text: String,
        rate: Option<Rate>,
        emphasis: Option<Emphasis>,
    },
    /// A silence request
    Break { seconds: f64 },
}

// surrounding whitespace collapses into the sentinel's own single-space
// padding, so boundaries stay single-spaced however the tag was written
static BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s*<break\s+time="(.*?)"\s*/>\s*"#).unwrap());
static PROSODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<prosody\s+rate="(slow|fast)">(.*?)</prosody>"#).unwrap());
static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<emphasis\s+level="(strong|moderate)">(.*?)</emphasis>"#).unwrap()
});
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static BREAK_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<\s*break\s+time\s*=\s*"(.*?)"\s*/\s*>$"#).unwrap());
static PROSODY_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<\s*prosody\s+rate\s*=\s*"(slow|fast)"\s*>$"#).unwrap());
static PROSODY_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*/\s*prosody\s*>$").unwrap());
static EMPHASIS_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<\s*emphasis\s+level\s*=\s*"(moderate|strong)"\s*>$"#).unwrap());
static EMPHASIS_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*/\s*emphasis\s*>$").unwrap());

/// Flat-mode parse: strip markup, emit break sentinels, collect hints
///
/// Transforms run in a fixed order: breaks, prosody pairs, emphasis pairs,
/// then a catch-all pass that strips every remaining tag. Pair content may
/// span lines. The output text is trimmed.
pub fn parse(raw: &str) -> (String, Vec<Hint>) {
    let mut hints = Vec::new();

    let text = BREAK_RE.replace_all(raw, |caps: &regex::Captures| {
        let time_value = &caps[1];
        hints.push(Hint {
            kind: HintKind::Break,
            value: time_value.to_string(),
        });
        encode_break(time_value)
    });

    let text = PROSODY_RE.replace_all(&text, |caps: &regex::Captures| {
        hints.push(Hint {
            kind: HintKind::Prosody,
            value: caps[1].to_ascii_lowercase(),
        });
        caps[2].to_string()
    });

    let text = EMPHASIS_RE.replace_all(&text, |caps: &regex::Captures| {
        hints.push(Hint {
            kind: HintKind::Emphasis,
            value: caps[1].to_ascii_lowercase(),
        });
        caps[2].to_string()
    });

    let text = ANY_TAG_RE.replace_all(&text, "");
    (text.trim().to_string(), hints)
}

/// Segment-mode parse: typed segments with the active style per text run
///
/// Tokenizes on tag boundaries and maintains one stack per style dimension,
/// so nesting in either order resolves correctly. A closing tag with an empty
/// stack is a no-op; unknown tags are dropped. Fails only when a break
/// duration cannot be resolved to seconds.
pub fn parse_segments(raw: &str) -> Result<Vec<Segment>> {
    let mut rate_stack: Vec<Rate> = Vec::new();
    let mut emphasis_stack: Vec<Emphasis> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();

    fn push_text(
        segments: &mut Vec<Segment>,
        text: &str,
        rate_stack: &[Rate],
        emphasis_stack: &[Emphasis],
    ) {
        if text.is_empty() {
            return;
        }
        segments.push(Segment::Text {
            text: text.to_string(),
            rate: rate_stack.last().copied(),
            emphasis: emphasis_stack.last().copied(),
        });
    }

    let mut last_end = 0;
    for tag_match in ANY_TAG_RE.find_iter(raw) {
        push_text(
            &mut segments,
            &raw[last_end..tag_match.start()],
            &rate_stack,
            &emphasis_stack,
        );
        last_end = tag_match.end();

        let tag = tag_match.as_str().trim().to_ascii_lowercase();
        if let Some(caps) = BREAK_TAG_RE.captures(&tag) {
            let seconds = break_to_seconds(&caps[1])?;
            segments.push(Segment::Break { seconds });
        } else if let Some(caps) = PROSODY_OPEN_RE.captures(&tag) {
            if let Some(rate) = Rate::from_attr(&caps[1]) {
                rate_stack.push(rate);
            }
        } else if PROSODY_CLOSE_RE.is_match(&tag) {
            rate_stack.pop();
        } else if let Some(caps) = EMPHASIS_OPEN_RE.captures(&tag) {
            if let Some(emphasis) = Emphasis::from_attr(&caps[1]) {
                emphasis_stack.push(emphasis);
            }
        } else if EMPHASIS_CLOSE_RE.is_match(&tag) {
            emphasis_stack.pop();
        }
        // any other tag is dropped
    }
    push_text(&mut segments, &raw[last_end..], &rate_stack, &emphasis_stack);

    Ok(merge_adjacent(segments))
}

/// Merge adjacent text segments that carry the same style
fn merge_adjacent(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match (merged.last_mut(), &segment) {
            (
                Some(Segment::Text {
                    text: last_text,
                    rate: last_rate,
                    emphasis: last_emphasis,
                }),
                Segment::Text {
                    text,
                    rate,
                    emphasis,
                },
            ) if last_rate == rate && last_emphasis == emphasis => {
                last_text.push_str(text);
            }
            _ => merged.push(segment),
        }
    }
    merged
}

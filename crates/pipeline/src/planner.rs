//! Request planning
//!
//! Reduces a request's text to an ordered list of synthesis steps: bounded
//! text units for the backend and pause durations for the assembler. Pause
//! information crosses the flat-string stage as break sentinels and is
//! resolved back to seconds here.

use serde::{Deserialize, Serialize};

use voicelab_config::SynthesisConfig;
use voicelab_core::{Emphasis, Rate, Result};
use voicelab_text_processing::{
    aggregate_hints, apply_pronunciation, break_to_seconds, chunk_text, decode_breaks, parse,
    BreakUnit, PronunciationEntry,
};

use crate::backend::SynthesisUnit;

/// A synthesis request as received from the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Raw text, possibly carrying markup
    pub text: String,
    /// Language code for the backend
    pub language: String,
    /// Caller-supplied style instruction, merged with derived markup style
    #[serde(default)]
    pub style: Option<String>,
    /// Requested output sample rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Pronunciation lexicon to apply before synthesis
    #[serde(default)]
    pub pronunciation: Vec<PronunciationEntry>,
    /// Speaking rate fallback applied as DSP when the backend ignores style
    #[serde(default)]
    pub rate: Option<Rate>,
    /// Emphasis fallback applied as DSP when the backend ignores style
    #[serde(default)]
    pub emphasis: Option<Emphasis>,
}

fn default_sample_rate() -> u32 {
    24000
}

impl SynthesisRequest {
    /// A request with only text and language set
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            style: None,
            sample_rate: default_sample_rate(),
            pronunciation: Vec::new(),
            rate: None,
            emphasis: None,
        }
    }
}

/// One step of a synthesis plan
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    /// Hand this unit to the backend
    Speak(SynthesisUnit),
    /// Insert this many seconds of silence
    Pause(f64),
}

/// The ordered steps for one request, plus the merged style instruction
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisPlan {
    pub steps: Vec<PlanStep>,
    pub style: Option<String>,
}

impl SynthesisPlan {
    /// Number of steps that invoke the backend
    pub fn unit_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, PlanStep::Speak(_)))
            .count()
    }
}

/// Plan a request into ordered synthesis steps
///
/// Markup is parsed first so pronunciation rules see stripped text but
/// cannot corrupt sentinel tokens; breaks resolve to seconds here, which is
/// the single point a malformed duration is rejected.
pub fn plan_request(request: &SynthesisRequest, config: &SynthesisConfig) -> Result<SynthesisPlan> {
    let (mut text, derived_style) = if config.enable_markup {
        let (stripped, hints) = parse(&request.text);
        let style = aggregate_hints(&hints);
        (stripped, if style.is_empty() { None } else { Some(style) })
    } else {
        (request.text.clone(), None)
    };

    if !request.pronunciation.is_empty() {
        text = apply_pronunciation(&text, &request.pronunciation);
    }

    let style = match (&request.style, &derived_style) {
        (Some(requested), Some(derived)) => Some(format!("{requested}, {derived}")),
        (Some(requested), None) => Some(requested.clone()),
        (None, Some(derived)) => Some(derived.clone()),
        (None, None) => None,
    };

    let mut steps = Vec::new();
    for unit in decode_breaks(&text) {
        match unit {
            BreakUnit::Text(value) => {
                for chunk in chunk_text(&value, config.max_chunk_chars) {
                    if chunk.trim().is_empty() {
                        continue;
                    }
                    steps.push(PlanStep::Speak(SynthesisUnit {
                        text: chunk,
                        style: style.clone(),
                        language: request.language.clone(),
                    }));
                }
            }
            BreakUnit::Break(value) => {
                steps.push(PlanStep::Pause(break_to_seconds(&value)?));
            }
        }
    }

    Ok(SynthesisPlan { steps, style })
}

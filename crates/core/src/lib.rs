//! Core types for the VoiceLab synthesis pipeline
//!
//! This crate provides foundational types used across all other crates:
//! - Audio chunk type
//! - Error taxonomy
//! - Speaking style vocabulary

pub mod audio;
pub mod error;
pub mod style;

pub use audio::AudioChunk;
pub use error::{Error, Result};
pub use style::{Emphasis, Rate};

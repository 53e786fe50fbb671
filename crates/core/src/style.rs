//! Speaking style vocabulary
//!
//! The closed attribute sets recognized by the markup grammar. Values outside
//! these sets never construct a variant; the parser drops them.

use serde::{Deserialize, Serialize};

/// Speaking rate modifier from `<prosody rate="...">`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rate {
    Slow,
    Fast,
}

impl Rate {
    /// Parse a prosody `rate` attribute value (case-insensitive)
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "slow" => Some(Rate::Slow),
            "fast" => Some(Rate::Fast),
            _ => None,
        }
    }

    /// The attribute spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Rate::Slow => "slow",
            Rate::Fast => "fast",
        }
    }
}

/// Emphasis level from `<emphasis level="...">`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Moderate,
    Strong,
}

impl Emphasis {
    /// Parse an emphasis `level` attribute value (case-insensitive)
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "moderate" => Some(Emphasis::Moderate),
            "strong" => Some(Emphasis::Strong),
            _ => None,
        }
    }

    /// The attribute spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Emphasis::Moderate => "moderate",
            Emphasis::Strong => "strong",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_attr() {
        assert_eq!(Rate::from_attr("slow"), Some(Rate::Slow));
        assert_eq!(Rate::from_attr("FAST"), Some(Rate::Fast));
        assert_eq!(Rate::from_attr("medium"), None);
    }

    #[test]
    fn test_emphasis_from_attr() {
        assert_eq!(Emphasis::from_attr("Moderate"), Some(Emphasis::Moderate));
        assert_eq!(Emphasis::from_attr("strong"), Some(Emphasis::Strong));
        assert_eq!(Emphasis::from_attr("reduced"), None);
    }
}

//! Style hint aggregation
//!
//! Reduces the ordered hint list from parsing into one natural-language
//! instruction string for a style-aware synthesis backend.

use crate::markup::{Hint, HintKind};

/// Build a synthesis instruction string from parsed hints
///
/// An empty result means "no style requested"; callers must not treat it as
/// an error.
pub fn aggregate_hints(hints: &[Hint]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for hint in hints {
        match hint.kind {
            HintKind::Prosody => match hint.value.as_str() {
                "slow" => parts.push("slow pace".to_string()),
                "fast" => parts.push("fast pace".to_string()),
                _ => {}
            },
            HintKind::Emphasis => match hint.value.as_str() {
                "strong" => parts.push("strong emphasis".to_string()),
                "moderate" => parts.push("moderate emphasis".to_string()),
                _ => {}
            },
            HintKind::Break => parts.push(format!("pause {}", hint.value)),
        }
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(kind: HintKind, value: &str) -> Hint {
        Hint {
            kind,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_aggregate_all_kinds() {
        let hints = vec![
            hint(HintKind::Prosody, "slow"),
            hint(HintKind::Emphasis, "strong"),
            hint(HintKind::Break, "300ms"),
        ];
        assert_eq!(
            aggregate_hints(&hints),
            "slow pace, strong emphasis, pause 300ms"
        );
    }

    #[test]
    fn test_aggregate_skips_unmapped_values() {
        let hints = vec![hint(HintKind::Prosody, "medium"), hint(HintKind::Prosody, "fast")];
        assert_eq!(aggregate_hints(&hints), "fast pace");
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate_hints(&[]), "");
    }
}

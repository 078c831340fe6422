//! Confidence and thinking-depth enums for workflow steps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How confident the caller is in the current hypothesis.
///
/// Ordered from exploratory to confirmatory; each tier has its own
/// guidance text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    Exploring,
    Low,
    Medium,
    High,
    VeryHigh,
    AlmostCertain,
    Certain,
}

impl Confidence {
    pub const ALL: [Confidence; 7] = [
        Confidence::Exploring,
        Confidence::Low,
        Confidence::Medium,
        Confidence::High,
        Confidence::VeryHigh,
        Confidence::AlmostCertain,
        Confidence::Certain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Exploring => "exploring",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
            Confidence::VeryHigh => "very_high",
            Confidence::AlmostCertain => "almost_certain",
            Confidence::Certain => "certain",
        }
    }

    /// Next-step guidance for this tier.
    pub fn guidance(&self) -> &'static str {
        match self {
            Confidence::Exploring => {
                "Continue exploring:\n\
                 - Gather initial information and symptoms\n\
                 - Identify the components involved\n\
                 - Form one or more initial hypotheses"
            }
            Confidence::Low => {
                "Gather more evidence:\n\
                 - Examine related files and dependencies\n\
                 - Check logs, outputs and recent changes\n\
                 - Test your initial hypothesis against concrete scenarios"
            }
            Confidence::Medium => {
                "Validate your hypothesis:\n\
                 - Build a minimal reproduction or counter-example\n\
                 - Check edge cases and boundary conditions\n\
                 - Look for the same pattern elsewhere"
            }
            Confidence::High => {
                "Consolidate your analysis:\n\
                 - Document the root cause or conclusion clearly\n\
                 - Identify the specific change that is needed\n\
                 - Consider side effects of that change"
            }
            Confidence::VeryHigh => {
                "Prepare to conclude:\n\
                 - Confirm the conclusion explains every observed symptom\n\
                 - Rule out the strongest remaining alternative\n\
                 - Draft the final recommendation"
            }
            Confidence::AlmostCertain => {
                "Final verification:\n\
                 - Re-check the evidence chain end to end\n\
                 - Make sure nothing in the findings contradicts the conclusion\n\
                 - Set next_step_required to false on the next call"
            }
            Confidence::Certain => {
                "The investigation is complete:\n\
                 - Summarize the confirmed conclusion\n\
                 - Finalize with next_step_required set to false"
            }
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Confidence::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown confidence level: {s}"))
    }
}

/// Reasoning budget requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingDepth {
    Minimal,
    Low,
    #[default]
    Medium,
    High,
    Max,
}

impl ThinkingDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThinkingDepth::Minimal => "minimal",
            ThinkingDepth::Low => "low",
            ThinkingDepth::Medium => "medium",
            ThinkingDepth::High => "high",
            ThinkingDepth::Max => "max",
        }
    }
}

impl fmt::Display for ThinkingDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tier_has_distinct_guidance() {
        let texts: HashSet<_> = Confidence::ALL.iter().map(|c| c.guidance()).collect();
        assert_eq!(texts.len(), Confidence::ALL.len());
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(Confidence::Exploring < Confidence::Low);
        assert!(Confidence::VeryHigh < Confidence::AlmostCertain);
        assert!(Confidence::AlmostCertain < Confidence::Certain);
    }

    #[test]
    fn test_confidence_parse_roundtrip() {
        for c in Confidence::ALL {
            assert_eq!(c.as_str().parse::<Confidence>().unwrap(), c);
        }
        assert!("sure".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_confidence_serde_snake_case() {
        let c: Confidence = serde_json::from_str("\"very_high\"").unwrap();
        assert_eq!(c, Confidence::VeryHigh);
        assert!(serde_json::from_str::<Confidence>("\"veryhigh\"").is_err());
    }

    #[test]
    fn test_thinking_depth_default() {
        assert_eq!(ThinkingDepth::default(), ThinkingDepth::Medium);
        let d: ThinkingDepth = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(d, ThinkingDepth::Max);
    }
}

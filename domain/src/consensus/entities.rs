//! Consensus value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rhetorical position a participant argues from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    For,
    Against,
    #[default]
    Neutral,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::For => "for",
            Stance::Against => "against",
            Stance::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant of a consensus run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusModel {
    pub model: String,
    #[serde(default)]
    pub stance: Stance,
    /// Extra instructions for this participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance_prompt: Option<String>,
}

impl ConsensusModel {
    pub fn new(model: impl Into<String>, stance: Stance) -> Self {
        Self {
            model: model.into(),
            stance,
            stance_prompt: None,
        }
    }

    pub fn with_stance_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.stance_prompt = Some(prompt.into());
        self
    }
}

impl fmt::Display for ConsensusModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.model, self.stance)
    }
}

/// Answer of one participant, accumulated across calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponseRecord {
    pub model: String,
    #[serde(default)]
    pub stance: Stance,
    pub response: String,
}

impl ModelResponseRecord {
    pub fn new(participant: &ConsensusModel, response: impl Into<String>) -> Self {
        Self {
            model: participant.model.clone(),
            stance: participant.stance,
            response: response.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_deserialize_defaults_to_neutral() {
        let m: ConsensusModel = serde_json::from_str(r#"{"model": "pro"}"#).unwrap();
        assert_eq!(m.stance, Stance::Neutral);
        assert!(m.stance_prompt.is_none());
    }

    #[test]
    fn test_unknown_stance_rejected() {
        let result = serde_json::from_str::<ConsensusModel>(r#"{"model": "pro", "stance": "maybe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let m = ConsensusModel::new("pro", Stance::Against);
        assert_eq!(m.to_string(), "pro (against)");
    }
}

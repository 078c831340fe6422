//! Challenge tool payload: a devil's-advocate review of one idea.

use crate::core::error::{ValidationError, require_text};
use crate::workflow::state::non_empty;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const CHALLENGE_SYSTEM_PROMPT: &str = "You are a senior principal engineer performing a critical design review. Your goal is to find flaws before they become problems.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub topic: Option<String>,
    #[serde(default, alias = "absolute_file_paths")]
    pub files: Vec<String>,
    pub model: Option<String>,
    pub continuation_id: Option<String>,
}

impl ChallengeRequest {
    pub fn into_state(self) -> Result<ChallengeState, ValidationError> {
        Ok(ChallengeState {
            topic: require_text("topic", self.topic)?,
            files: self.files,
            model: non_empty(self.model).filter(|m| !m.eq_ignore_ascii_case("auto")),
            continuation_id: non_empty(self.continuation_id),
        })
    }
}

/// Validated challenge request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeState {
    pub topic: String,
    pub files: Vec<String>,
    pub model: Option<String>,
    pub continuation_id: Option<String>,
}

impl ChallengeState {
    pub fn prompt(&self) -> String {
        let mut out = format!("Please critically analyze this topic: {}\n\n", self.topic);
        if !self.files.is_empty() {
            out.push_str("## Context Files\n\n");
            for file in &self.files {
                let _ = writeln!(out, "- {file}");
            }
            out.push('\n');
        }
        out.push_str(
            "Please play Devil's Advocate and provide a critical analysis:\n\
             1. Potential flaws or edge cases\n\
             2. Security implications\n\
             3. Performance bottlenecks\n\
             4. Maintenance or scalability concerns\n\
             5. Alternative approaches that might be better\n\n\
             Be constructive but rigorous.",
        );
        out
    }

    /// Text recorded as the user turn.
    pub fn summary(&self) -> String {
        format!("Challenge: {}", self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_required() {
        let err = ChallengeRequest::default().into_state().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("topic"));
    }

    #[test]
    fn test_prompt_lists_files() {
        let request: ChallengeRequest = serde_json::from_value(serde_json::json!({
            "topic": "Move sessions into Redis",
            "absolute_file_paths": ["/src/session.rs"]
        }))
        .unwrap();
        let state = request.into_state().unwrap();
        let prompt = state.prompt();
        assert!(prompt.starts_with("Please critically analyze this topic: Move sessions into Redis"));
        assert!(prompt.contains("## Context Files\n\n- /src/session.rs\n"));
        assert!(prompt.ends_with("Be constructive but rigorous."));
        assert_eq!(state.summary(), "Challenge: Move sessions into Redis");
    }
}

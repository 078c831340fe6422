//! Consensus request payload, validated state and phase selection.

use super::entities::{ConsensusModel, ModelResponseRecord};
use crate::conversation::entities::ConversationTurn;
use crate::core::error::ValidationError;
use crate::workflow::state::{WorkflowRequest, WorkflowState, non_empty};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const PROPOSAL_PREFIX: &str = "Proposal: ";
const PARTICIPANTS_MARKER: &str = "\n\nParticipants:";

/// Raw consensus payload: the workflow fields plus caller-held progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsensusRequest {
    #[serde(flatten)]
    pub workflow: WorkflowRequest,
    #[serde(default)]
    pub models: Vec<ConsensusModel>,
    #[serde(default)]
    pub current_model_index: usize,
    #[serde(default)]
    pub model_responses: Vec<ModelResponseRecord>,
    /// Proposal text; falls back to the recorded proposal, then to `step`
    pub proposal: Option<String>,
}

impl ConsensusRequest {
    pub fn into_state(self) -> Result<ConsensusState, ValidationError> {
        let workflow = self.workflow.into_state()?;

        if self.models.is_empty() {
            return Err(ValidationError::MissingField("models"));
        }
        if let Some(pos) = self.models.iter().position(|m| m.model.trim().is_empty()) {
            return Err(ValidationError::invalid(
                "models",
                format!("entry {pos} has an empty model name"),
            ));
        }
        if workflow.step_number == 1 {
            validate_participants(&self.models)?;
        }

        let explicit = non_empty(self.proposal);
        let explicit_proposal = explicit.is_some();
        let proposal = explicit.unwrap_or_else(|| workflow.step.clone());
        // Phase 1 always restarts the run.
        let (current_model_index, model_responses) = if workflow.step_number == 1 {
            (0, Vec::new())
        } else {
            (self.current_model_index, self.model_responses)
        };

        Ok(ConsensusState {
            workflow,
            proposal,
            explicit_proposal,
            models: self.models,
            current_model_index,
            model_responses,
        })
    }
}

/// Require at least two participants and no repeated (model, stance) pair.
pub fn validate_participants(models: &[ConsensusModel]) -> Result<(), ValidationError> {
    if models.len() < 2 {
        return Err(ValidationError::TooFewParticipants(models.len()));
    }
    let mut seen = HashSet::new();
    for m in models {
        if !seen.insert((m.model.as_str(), m.stance)) {
            return Err(ValidationError::DuplicateParticipant {
                model: m.model.clone(),
                stance: m.stance.to_string(),
            });
        }
    }
    Ok(())
}

/// Which part of the run a call performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusPhase {
    ProposalCapture,
    Consultation(usize),
    Synthesis,
}

/// Validated consensus state for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusState {
    pub workflow: WorkflowState,
    pub proposal: String,
    explicit_proposal: bool,
    pub models: Vec<ConsensusModel>,
    pub current_model_index: usize,
    pub model_responses: Vec<ModelResponseRecord>,
}

impl ConsensusState {
    /// Phase is keyed on `step_number` and `current_model_index` only.
    pub fn phase(&self) -> ConsensusPhase {
        if self.workflow.step_number == 1 {
            ConsensusPhase::ProposalCapture
        } else if self.current_model_index < self.models.len() {
            ConsensusPhase::Consultation(self.current_model_index)
        } else {
            ConsensusPhase::Synthesis
        }
    }

    pub fn participant(&self, index: usize) -> Option<&ConsensusModel> {
        self.models.get(index)
    }

    pub fn remaining(&self) -> usize {
        self.models.len().saturating_sub(self.current_model_index)
    }

    /// Prefer the proposal recorded at phase 1 unless the payload names one.
    pub fn recover_proposal(&mut self, turns: &[ConversationTurn]) {
        if self.explicit_proposal {
            return;
        }
        if let Some(recorded) = recorded_proposal(turns) {
            self.proposal = recorded;
        }
    }

    /// Record one answer and move to the next participant.
    pub fn record_response(&mut self, record: ModelResponseRecord) {
        self.model_responses.push(record);
        self.current_model_index += 1;
    }

    /// User turn persisted at phase 1.
    pub fn proposal_turn(&self, tool_name: &str) -> ConversationTurn {
        let participants = self
            .models
            .iter()
            .map(|m| format!("- {m}"))
            .collect::<Vec<_>>()
            .join("\n");
        ConversationTurn::user(format!(
            "{PROPOSAL_PREFIX}{}{PARTICIPANTS_MARKER}\n{participants}",
            self.proposal
        ))
        .with_tool(tool_name)
        .with_files(self.workflow.relevant_files.clone())
    }
}

/// Proposal text from the first phase-1 turn of a thread, if any.
pub fn recorded_proposal(turns: &[ConversationTurn]) -> Option<String> {
    turns
        .iter()
        .filter(|t| t.is_user())
        .find_map(|t| {
            let rest = t.content.strip_prefix(PROPOSAL_PREFIX)?;
            let end = rest.rfind(PARTICIPANTS_MARKER)?;
            Some(rest[..end].to_string())
        })
        .filter(|p| !p.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::entities::Stance;
    use serde_json::json;

    fn payload(step_number: u32) -> serde_json::Value {
        json!({
            "step": "Adopt a write-ahead log",
            "step_number": step_number,
            "total_steps": 3,
            "next_step_required": true,
            "findings": "Crash recovery is slow",
            "models": [
                {"model": "pro", "stance": "for"},
                {"model": "flash", "stance": "against"}
            ]
        })
    }

    fn parse(value: serde_json::Value) -> Result<ConsensusState, ValidationError> {
        serde_json::from_value::<ConsensusRequest>(value)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?
            .into_state()
    }

    #[test]
    fn test_flattened_payload_parses() {
        let state = parse(payload(1)).unwrap();
        assert_eq!(state.workflow.step_number, 1);
        assert_eq!(state.models.len(), 2);
        assert_eq!(state.proposal, "Adopt a write-ahead log");
        assert_eq!(state.phase(), ConsensusPhase::ProposalCapture);
    }

    #[test]
    fn test_single_participant_rejected() {
        let mut value = payload(1);
        value["models"] = json!([{"model": "pro"}]);
        assert_eq!(parse(value), Err(ValidationError::TooFewParticipants(1)));
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let mut value = payload(1);
        value["models"] = json!([
            {"model": "pro", "stance": "for"},
            {"model": "pro", "stance": "for"}
        ]);
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("duplicate model+stance combination"));
    }

    #[test]
    fn test_same_model_different_stances_allowed() {
        let models = vec![
            ConsensusModel::new("pro", Stance::For),
            ConsensusModel::new("pro", Stance::Against),
        ];
        assert!(validate_participants(&models).is_ok());
    }

    #[test]
    fn test_missing_models() {
        let mut value = payload(2);
        value.as_object_mut().unwrap().remove("models");
        assert_eq!(parse(value), Err(ValidationError::MissingField("models")));
    }

    #[test]
    fn test_phase_selection_by_index() {
        let mut value = payload(2);
        value["current_model_index"] = json!(1);
        assert_eq!(parse(value.clone()).unwrap().phase(), ConsensusPhase::Consultation(1));

        value["current_model_index"] = json!(2);
        value["next_step_required"] = json!(true);
        assert_eq!(parse(value).unwrap().phase(), ConsensusPhase::Synthesis);
    }

    #[test]
    fn test_phase_one_resets_progress() {
        let mut value = payload(1);
        value["current_model_index"] = json!(1);
        value["model_responses"] = json!([{"model": "pro", "stance": "for", "response": "yes"}]);
        let state = parse(value).unwrap();
        assert_eq!(state.current_model_index, 0);
        assert!(state.model_responses.is_empty());
    }

    #[test]
    fn test_proposal_recovered_from_thread() {
        let first = parse(payload(1)).unwrap();
        let turns = vec![first.proposal_turn("consensus")];

        let mut value = payload(2);
        value["step"] = json!("Consult the next model");
        let mut later = parse(value).unwrap();
        later.recover_proposal(&turns);
        assert_eq!(later.proposal, "Adopt a write-ahead log");
    }

    #[test]
    fn test_explicit_proposal_wins_over_thread() {
        let first = parse(payload(1)).unwrap();
        let turns = vec![first.proposal_turn("consensus")];

        let mut value = payload(2);
        value["proposal"] = json!("Adopt an LSM tree");
        let mut later = parse(value).unwrap();
        later.recover_proposal(&turns);
        assert_eq!(later.proposal, "Adopt an LSM tree");
    }

    #[test]
    fn test_record_response_advances_index() {
        let mut state = parse(payload(2)).unwrap();
        let first = state.models[0].clone();
        state.record_response(ModelResponseRecord::new(&first, "in favour"));
        assert_eq!(state.current_model_index, 1);
        assert_eq!(state.remaining(), 1);
        assert_eq!(state.model_responses[0].stance, Stance::For);
    }
}

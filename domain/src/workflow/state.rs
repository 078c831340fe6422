//! Workflow request payload and validated step state.

use super::confidence::{Confidence, ThinkingDepth};
use crate::conversation::entities::ConversationTurn;
use crate::core::error::{ValidationError, require_text};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKFLOW_TEMPERATURE: f64 = 0.3;

/// Marker that identifies a findings-bearing step turn.
pub const FINDINGS_MARKER: &str = "Findings:";

/// Raw workflow payload as sent by the caller.
///
/// Every field is optional at this level so that missing values can be
/// reported as [`ValidationError::MissingField`]; values of the wrong type
/// are rejected during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub step: Option<String>,
    pub step_number: Option<u32>,
    pub total_steps: Option<u32>,
    pub next_step_required: Option<bool>,
    pub findings: Option<String>,
    pub hypothesis: Option<String>,
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub relevant_files: Vec<String>,
    #[serde(default)]
    pub files_checked: Vec<String>,
    pub continuation_id: Option<String>,
    pub use_assistant_model: Option<bool>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub thinking_mode: Option<ThinkingDepth>,
}

impl WorkflowRequest {
    /// Validate the payload and apply defaults.
    pub fn into_state(self) -> Result<WorkflowState, ValidationError> {
        let step = require_text("step", self.step)?;
        let findings = require_text("findings", self.findings)?;

        let step_number = self.step_number.unwrap_or(1);
        if step_number == 0 {
            return Err(ValidationError::invalid("step_number", "must be at least 1"));
        }
        let total_steps = self.total_steps.unwrap_or(1).max(step_number);

        let temperature = validate_temperature(self.temperature, DEFAULT_WORKFLOW_TEMPERATURE)?;

        Ok(WorkflowState {
            step,
            step_number,
            total_steps,
            next_step_required: self.next_step_required.unwrap_or(false),
            findings,
            hypothesis: non_empty(self.hypothesis),
            confidence: self.confidence.unwrap_or_default(),
            relevant_files: self.relevant_files,
            files_checked: self.files_checked,
            continuation_id: non_empty(self.continuation_id),
            use_assistant: self.use_assistant_model.unwrap_or(true),
            model: non_empty(self.model).filter(|m| !m.eq_ignore_ascii_case("auto")),
            temperature,
            thinking_depth: self.thinking_mode,
        })
    }
}

/// Validated state of one workflow step.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub step: String,
    pub step_number: u32,
    pub total_steps: u32,
    pub next_step_required: bool,
    pub findings: String,
    pub hypothesis: Option<String>,
    pub confidence: Confidence,
    pub relevant_files: Vec<String>,
    pub files_checked: Vec<String>,
    pub continuation_id: Option<String>,
    pub use_assistant: bool,
    /// Explicit model request; `None` means auto-select
    pub model: Option<String>,
    pub temperature: f64,
    pub thinking_depth: Option<ThinkingDepth>,
}

impl WorkflowState {
    /// Text persisted for this step: step, findings and hypothesis.
    pub fn summary(&self, step_label: &str) -> String {
        let mut content = format!(
            "{} {}: {}\n\n{} {}",
            step_label, self.step_number, self.step, FINDINGS_MARKER, self.findings
        );
        if let Some(hypothesis) = &self.hypothesis {
            content.push_str(&format!("\n\nHypothesis: {hypothesis}"));
        }
        content
    }

    /// User turn recording this step, tagged with the tool and the files
    /// the caller marked as relevant.
    pub fn to_turn(&self, tool_name: &str, step_label: &str) -> ConversationTurn {
        ConversationTurn::user(self.summary(step_label))
            .with_tool(tool_name)
            .with_files(self.relevant_files.clone())
    }
}

/// Concatenate every findings-bearing user turn, in turn order.
pub fn consolidate_findings(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .filter(|t| t.is_user() && t.content.contains(FINDINGS_MARKER))
        .map(|t| t.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

pub(crate) fn validate_temperature(
    value: Option<f64>,
    default: f64,
) -> Result<f64, ValidationError> {
    match value {
        None => Ok(default),
        Some(t) if (0.0..=1.0).contains(&t) => Ok(t),
        Some(t) => Err(ValidationError::invalid(
            "temperature",
            format!("{t} is outside 0.0..=1.0"),
        )),
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

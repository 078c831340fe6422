//! Prompt and response text for workflow and chat tools.

use crate::workflow::{WorkflowKind, WorkflowState};
use std::fmt::Write;

/// Templates for workflow step responses and the expert request
pub struct WorkflowPrompt;

impl WorkflowPrompt {
    /// Intermediate step response: progress, confidence and guidance.
    pub fn guidance(kind: WorkflowKind, state: &WorkflowState, continuation_id: &str) -> String {
        let mut out = format!("## Step {} of {}\n\n", state.step_number, state.total_steps);
        let _ = writeln!(out, "**Confidence:** {}", state.confidence);
        if let Some(hypothesis) = &state.hypothesis {
            let _ = writeln!(out, "**Current Hypothesis:** {}", hypothesis);
        }
        out.push_str("\n### Guidance\n\n");
        out.push_str(state.confidence.guidance());
        out.push_str("\n\n### Checklist\n\n");
        out.push_str(kind.checklist());
        let _ = write!(out, "\n\n---\ncontinuation_id: {}\n", continuation_id);
        out
    }

    /// Request sent to the expert model when a workflow finalizes.
    pub fn expert_request(kind: WorkflowKind, consolidated: &str, state: &WorkflowState) -> String {
        let mut out = format!(
            "Analyze this {} investigation and provide your expert assessment.\n\n",
            kind
        );
        let _ = write!(out, "## Investigation Summary\n{}\n\n", consolidated);
        if let Some(hypothesis) = &state.hypothesis {
            let _ = write!(out, "## Final Hypothesis\n{}\n\n", hypothesis);
        }
        if !state.files_checked.is_empty() {
            out.push_str("## Files Examined\n");
            for file in &state.files_checked {
                let _ = writeln!(out, "- {}", file);
            }
            out.push('\n');
        }
        let _ = write!(out, "Please provide:\n{}", kind.expert_request());
        out
    }

    /// Final result when the workflow finalizes without an expert call.
    pub fn findings_only(state: &WorkflowState, consolidated: &str) -> String {
        let mut out = String::new();
        if let Some(hypothesis) = &state.hypothesis {
            let _ = write!(out, "**Hypothesis:** {}\n\n", hypothesis);
        }
        let _ = write!(out, "**Findings:**\n{}", consolidated);
        out
    }

    /// Frame a final result with its heading and thread id.
    pub fn complete(heading: &str, body: &str, continuation_id: &str) -> String {
        format!("## {}\n\n{}\n\n---\ncontinuation_id: {}", heading, body, continuation_id)
    }

    /// Chat system prompt, prefixed with the thread summary when continuing.
    pub fn chat_system(context_summary: Option<&str>) -> String {
        const BASE: &str = "You are a senior engineering thought-partner. \
Give precise, practical answers, say when you are unsure, and prefer \
concrete examples over generalities.";
        match context_summary {
            Some(summary) => format!("{}\n{}", summary, BASE),
            None => BASE.to_string(),
        }
    }
}

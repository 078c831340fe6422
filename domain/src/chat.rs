//! Chat tool payload.

use crate::core::error::{ValidationError, require_text};
use crate::workflow::ThinkingDepth;
use crate::workflow::state::{non_empty, validate_temperature};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAT_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub thinking_mode: Option<ThinkingDepth>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub continuation_id: Option<String>,
}

impl ChatRequest {
    pub fn into_state(self) -> Result<ChatState, ValidationError> {
        Ok(ChatState {
            prompt: require_text("prompt", self.prompt)?,
            model: non_empty(self.model).filter(|m| !m.eq_ignore_ascii_case("auto")),
            temperature: validate_temperature(self.temperature, DEFAULT_CHAT_TEMPERATURE)?,
            thinking_depth: self.thinking_mode,
            files: self.files,
            images: self.images,
            continuation_id: non_empty(self.continuation_id),
        })
    }
}

/// Validated chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub prompt: String,
    pub model: Option<String>,
    pub temperature: f64,
    pub thinking_depth: Option<ThinkingDepth>,
    pub files: Vec<String>,
    pub images: Vec<String>,
    pub continuation_id: Option<String>,
}

impl ChatState {
    /// Prompt text with referenced files listed after it.
    pub fn full_prompt(&self) -> String {
        if self.files.is_empty() {
            return self.prompt.clone();
        }
        let files = self
            .files
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n## Referenced Files\n\n{}", self.prompt, files)
    }
}

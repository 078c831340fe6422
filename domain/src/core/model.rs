//! Model capability descriptors
//!
//! The core never talks to a provider directly; it only needs to know which
//! models exist, what they are called, and how capable they are so that an
//! expert or synthesis model can be picked.

use serde::{Deserialize, Serialize};

/// Minimum intelligence score for expert analysis and consensus synthesis.
pub const EXPERT_MIN_INTELLIGENCE: u8 = 80;

/// Capability descriptor for one model (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    /// Canonical model name sent to the provider
    pub name: String,
    /// Relative capability on a 1-100 scale
    pub intelligence_score: u8,
    /// Alternative names accepted in tool payloads
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub supports_thinking: bool,
    #[serde(default)]
    pub allow_code_generation: bool,
    /// Context window in tokens (0 = unknown)
    #[serde(default)]
    pub context_window: u32,
}

impl ModelCapabilities {
    pub fn new(name: impl Into<String>, intelligence_score: u8) -> Self {
        Self {
            name: name.into(),
            intelligence_score: intelligence_score.min(100),
            aliases: Vec::new(),
            supports_thinking: false,
            allow_code_generation: false,
            context_window: 0,
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_thinking(mut self) -> Self {
        self.supports_thinking = true;
        self
    }

    pub fn with_code_generation(mut self) -> Self {
        self.allow_code_generation = true;
        self
    }

    pub fn with_context_window(mut self, tokens: u32) -> Self {
        self.context_window = tokens;
        self
    }

    /// Whether `name` is this model's canonical name or one of its aliases.
    ///
    /// Comparison is ASCII case-insensitive.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    pub fn meets(&self, requirements: &ModelRequirements) -> bool {
        if self.intelligence_score < requirements.min_intelligence {
            return false;
        }
        if requirements.needs_thinking && !self.supports_thinking {
            return false;
        }
        if requirements.needs_code_generation && !self.allow_code_generation {
            return false;
        }
        self.context_window >= requirements.min_context_window
    }
}

/// Constraints used when auto-selecting a model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelRequirements {
    pub min_intelligence: u8,
    pub needs_thinking: bool,
    pub needs_code_generation: bool,
    pub min_context_window: u32,
}

impl ModelRequirements {
    /// Requirements for the final expert call of a workflow tool.
    pub fn expert() -> Self {
        Self {
            min_intelligence: EXPERT_MIN_INTELLIGENCE,
            needs_thinking: true,
            needs_code_generation: true,
            min_context_window: 0,
        }
    }

    /// Requirements for consensus synthesis: intelligence only.
    pub fn synthesis() -> Self {
        Self {
            min_intelligence: EXPERT_MIN_INTELLIGENCE,
            ..Self::default()
        }
    }
}

/// Pick the highest-scoring model meeting `requirements`.
///
/// Ties go to the model listed first, so the caller's ordering is the
/// priority list.
pub fn select_best<'a>(
    models: impl IntoIterator<Item = &'a ModelCapabilities>,
    requirements: &ModelRequirements,
) -> Option<&'a ModelCapabilities> {
    models
        .into_iter()
        .filter(|m| m.meets(requirements))
        .fold(None, |best: Option<&ModelCapabilities>, m| match best {
            Some(b) if b.intelligence_score >= m.intelligence_score => Some(b),
            _ => Some(m),
        })
}

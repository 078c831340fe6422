//! Model Catalog port
//!
//! Resolves model names and aliases and picks models by capability.

use relay_domain::{ModelCapabilities, ModelRequirements};

/// Read-only view of the configured models.
pub trait ModelCatalog: Send + Sync {
    /// Every known model, in priority order.
    fn models(&self) -> &[ModelCapabilities];

    /// Look up a model by name or alias (case-insensitive).
    fn resolve(&self, name: &str) -> Option<ModelCapabilities> {
        self.models().iter().find(|m| m.answers_to(name)).cloned()
    }

    /// Highest-scoring model meeting `requirements`; first listed wins ties.
    fn select_best(&self, requirements: &ModelRequirements) -> Option<ModelCapabilities> {
        relay_domain::select_best(self.models(), requirements).cloned()
    }
}

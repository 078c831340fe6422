//! Static model catalog built from configuration.

use crate::config::FileModelConfig;
use relay_application::ModelCatalog;
use relay_domain::ModelCapabilities;

/// Catalog whose entries are fixed at startup, in priority order
#[derive(Debug, Clone)]
pub struct StaticModelCatalog {
    models: Vec<ModelCapabilities>,
}

impl StaticModelCatalog {
    pub fn new(models: Vec<ModelCapabilities>) -> Self {
        Self { models }
    }

    /// Catalog from `[[models]]`, or the built-in list when none are configured.
    pub fn from_config(models: &[FileModelConfig]) -> Self {
        if models.is_empty() {
            return Self::builtin();
        }
        Self::new(models.iter().map(FileModelConfig::to_capabilities).collect())
    }

    /// Defaults for an OpenAI-compatible endpoint.
    pub fn builtin() -> Self {
        Self::new(vec![
            ModelCapabilities::new("o3", 95)
                .with_aliases(vec!["reasoning".into()])
                .with_thinking()
                .with_code_generation()
                .with_context_window(200_000),
            ModelCapabilities::new("gpt-4.1", 88)
                .with_aliases(vec!["gpt4.1".into()])
                .with_code_generation()
                .with_context_window(1_000_000),
            ModelCapabilities::new("o4-mini", 85)
                .with_aliases(vec!["mini".into()])
                .with_thinking()
                .with_code_generation()
                .with_context_window(200_000),
            ModelCapabilities::new("gpt-4.1-mini", 72)
                .with_aliases(vec!["fast".into()])
                .with_code_generation()
                .with_context_window(1_000_000),
        ])
    }
}

impl ModelCatalog for StaticModelCatalog {
    fn models(&self) -> &[ModelCapabilities] {
        &self.models
    }
}

//! Model catalog entries from TOML (`[[models]]` array)

use super::issue::ConfigIssue;
use relay_domain::ModelCapabilities;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog entry
///
/// # Example
///
/// ```toml
/// [[models]]
/// name = "o3"
/// intelligence_score = 95
/// aliases = ["reasoning"]
/// supports_thinking = true
/// allow_code_generation = true
/// context_window = 200000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub name: String,
    pub intelligence_score: u8,
    pub aliases: Vec<String>,
    pub supports_thinking: bool,
    pub allow_code_generation: bool,
    pub context_window: u32,
}

impl FileModelConfig {
    pub fn to_capabilities(&self) -> ModelCapabilities {
        let mut caps = ModelCapabilities::new(self.name.trim(), self.intelligence_score)
            .with_aliases(self.aliases.clone())
            .with_context_window(self.context_window);
        if self.supports_thinking {
            caps = caps.with_thinking();
        }
        if self.allow_code_generation {
            caps = caps.with_code_generation();
        }
        caps
    }
}

/// Report empty names, out-of-range scores and names or aliases claimed by
/// more than one entry.
pub(super) fn validate_models(models: &[FileModelConfig]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (i, model) in models.iter().enumerate() {
        let field = format!("models[{i}]");
        if model.name.trim().is_empty() {
            issues.push(ConfigIssue::error(
                format!("{field}.name"),
                "model name must not be empty",
            ));
            continue;
        }
        if model.intelligence_score > 100 {
            issues.push(ConfigIssue::warning(
                format!("{field}.intelligence_score"),
                format!("{} is above 100 and will be capped", model.intelligence_score),
            ));
        }

        for name in std::iter::once(&model.name).chain(model.aliases.iter()) {
            let key = name.trim().to_lowercase();
            if let Some(first) = owners.insert(key, i)
                && first != i
            {
                issues.push(ConfigIssue::error(
                    field.clone(),
                    format!("'{name}' is already used by models[{first}]"),
                ));
            }
        }
    }
    issues
}

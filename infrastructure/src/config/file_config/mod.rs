//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types.

mod behavior;
mod conversation;
mod issue;
mod models;
mod provider;

pub use behavior::FileBehaviorConfig;
pub use conversation::{FileConversationConfig, MAX_SWEEP_INTERVAL_MINUTES};
pub use issue::{ConfigIssue, Severity};
pub use models::FileModelConfig;
pub use provider::FileProviderConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Thread store limits
    pub conversation: FileConversationConfig,
    /// Model call behavior
    pub behavior: FileBehaviorConfig,
    /// OpenAI-compatible provider settings
    pub provider: FileProviderConfig,
    /// Model catalog; the built-in catalog is used when empty
    pub models: Vec<FileModelConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.conversation.max_turns == 0 {
            issues.push(ConfigIssue::error(
                "conversation.max_turns",
                "must be at least 1",
            ));
        }
        if self.conversation.ttl_hours == 0 {
            issues.push(ConfigIssue::warning(
                "conversation.ttl_hours",
                "0 expires every thread immediately",
            ));
        }
        if self.conversation.sweep_interval_minutes == 0 {
            issues.push(ConfigIssue::error(
                "conversation.sweep_interval_minutes",
                "must be at least 1",
            ));
        } else if self.conversation.sweep_interval_minutes > MAX_SWEEP_INTERVAL_MINUTES {
            issues.push(ConfigIssue::warning(
                "conversation.sweep_interval_minutes",
                format!("capped at {MAX_SWEEP_INTERVAL_MINUTES}"),
            ));
        }
        if self.provider.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("provider.base_url", "must not be empty"));
        }

        issues.extend(models::validate_models(&self.models));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[conversation]
max_turns = 20
ttl_hours = 1

[behavior]
timeout_seconds = 90

[provider]
base_url = "http://localhost:11434/v1"
api_key_env = "LOCAL_KEY"

[[models]]
name = "o3"
intelligence_score = 95
aliases = ["reasoning"]
supports_thinking = true
allow_code_generation = true

[[models]]
name = "gpt-4o-mini"
intelligence_score = 70
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.conversation.max_turns, 20);
        assert_eq!(config.conversation.sweep_interval_minutes, 15);
        assert_eq!(config.behavior.timeout_seconds, Some(90));
        assert_eq!(config.provider.api_key_env, "LOCAL_KEY");
        assert_eq!(config.models.len(), 2);

        let caps = config.models[0].to_capabilities();
        assert!(caps.supports_thinking);
        assert!(caps.answers_to("REASONING"));

        let conversation = config.conversation.to_conversation_config();
        assert_eq!(conversation.ttl, Duration::from_secs(3600));
        assert_eq!(conversation.max_turns, 20);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.conversation.max_turns, 50);
        assert_eq!(config.conversation.ttl_hours, 3);
        assert!(config.behavior.timeout_seconds.is_none());
        assert!(config.models.is_empty());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = FileConfig::default();
        config.conversation.max_turns = 0;
        config.models = vec![
            FileModelConfig {
                name: "pro".into(),
                intelligence_score: 90,
                ..Default::default()
            },
            FileModelConfig {
                name: "flash".into(),
                intelligence_score: 70,
                aliases: vec!["PRO".into()],
                ..Default::default()
            },
            FileModelConfig::default(),
        ];

        let issues = config.validate();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["conversation.max_turns", "models[1]", "models[2].name"]
        );
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_oversized_sweep_interval_is_a_warning() {
        let mut config = FileConfig::default();
        config.conversation.sweep_interval_minutes = u64::MAX;
        config.conversation.ttl_hours = u64::MAX;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "conversation.sweep_interval_minutes");
        assert!(!issues[0].is_error());
    }
}

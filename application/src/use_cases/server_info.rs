//! Stateless informational tools: `listmodels` and `version`.

use crate::ports::model_catalog::ModelCatalog;
use crate::use_cases::dispatch::ToolKind;
use crate::use_cases::output::ToolOutput;
use std::fmt::Write;

pub const LIST_MODELS_TOOL: &str = "listmodels";
pub const LIST_MODELS_DESCRIPTION: &str =
    "Shows available model names, their aliases and capabilities.";

pub const VERSION_TOOL: &str = "version";
pub const VERSION_DESCRIPTION: &str =
    "Get server version, configuration details, and list of available tools.";

/// Markdown listing of every catalog model, in priority order.
pub fn list_models<C: ModelCatalog + ?Sized>(catalog: &C) -> ToolOutput {
    let mut out = String::from("# Available Models\n\n");
    for model in catalog.models() {
        let aliases = if model.aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", model.aliases.join(", "))
        };
        let mut features = Vec::new();
        if model.supports_thinking {
            features.push("thinking");
        }
        if model.allow_code_generation {
            features.push("code-gen");
        }
        let _ = writeln!(out, "- **{}**{}", model.name, aliases);
        let _ = writeln!(
            out,
            "  - Score: {} | Context: {}k | Features: {}",
            model.intelligence_score,
            model.context_window / 1000,
            features.join(", ")
        );
    }
    ToolOutput::stateless(out).with_meta("model_count", catalog.models().len())
}

pub fn version() -> ToolOutput {
    let mut out = format!("relay-council\nVersion: {}\n\nAvailable tools:\n\n", env!("CARGO_PKG_VERSION"));
    for tool in ToolKind::all() {
        let _ = writeln!(out, "- {}: {}", tool.name(), tool.description());
    }
    out.push_str("\nUse 'listmodels' to see available models.");
    ToolOutput::stateless(out).with_meta("version", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::catalog;

    #[test]
    fn test_list_models_shows_aliases_and_features() {
        let output = list_models(&catalog());
        assert!(output.content.starts_with("# Available Models"));
        assert!(output.content.contains("- **flash** (aliases: fast)\n  - Score: 70 | Context: 0k | Features: \n"));
        assert!(output.content.contains("- **pro**\n  - Score: 90 | Context: 0k | Features: thinking, code-gen"));
        assert!(output.continuation_id.is_empty());
        assert_eq!(output.meta("model_count").unwrap(), 3);
    }

    #[test]
    fn test_version_lists_every_tool() {
        let output = version();
        assert!(output.content.contains(env!("CARGO_PKG_VERSION")));
        for tool in ToolKind::all() {
            assert!(output.content.contains(&format!("- {}: ", tool.name())));
        }
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("continuation_id").is_none());
    }
}

//! Thread store configuration from TOML (`[conversation]` section)

use relay_application::ConversationConfig;
use relay_application::config::conversation::{
    DEFAULT_HISTORY_TOKEN_BUDGET, DEFAULT_MAX_TURNS, DEFAULT_SWEEP_INTERVAL_MINUTES,
    DEFAULT_TTL_HOURS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted sweep period (one week)
pub const MAX_SWEEP_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Thread store configuration from TOML
///
/// # Example
///
/// ```toml
/// [conversation]
/// max_turns = 50
/// ttl_hours = 3
/// sweep_interval_minutes = 15
/// history_token_budget = 24000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    pub max_turns: usize,
    pub ttl_hours: u64,
    pub sweep_interval_minutes: u64,
    pub history_token_budget: usize,
}

impl Default for FileConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            ttl_hours: DEFAULT_TTL_HOURS,
            sweep_interval_minutes: DEFAULT_SWEEP_INTERVAL_MINUTES,
            history_token_budget: DEFAULT_HISTORY_TOKEN_BUDGET,
        }
    }
}

impl FileConversationConfig {
    pub fn to_conversation_config(&self) -> ConversationConfig {
        ConversationConfig::default()
            .with_max_turns(self.max_turns)
            .with_ttl(Duration::from_secs(self.ttl_hours.saturating_mul(3600)))
            .with_sweep_interval(Duration::from_secs(
                self.sweep_interval_minutes
                    .min(MAX_SWEEP_INTERVAL_MINUTES)
                    .saturating_mul(60),
            ))
            .with_history_token_budget(self.history_token_budget)
    }
}

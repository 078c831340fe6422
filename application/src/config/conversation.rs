//! Thread store limits.

use std::time::Duration;

pub const DEFAULT_MAX_TURNS: usize = 50;
pub const DEFAULT_TTL_HOURS: u64 = 3;
pub const DEFAULT_SWEEP_INTERVAL_MINUTES: u64 = 15;
pub const DEFAULT_HISTORY_TOKEN_BUDGET: usize = 24_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationConfig {
    /// Turns kept per thread; older turns are dropped first
    pub max_turns: usize,
    /// Idle time after which a thread expires
    pub ttl: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
    /// Token budget for history sent with chat requests
    pub history_token_budget: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            ttl: Duration::from_secs(DEFAULT_TTL_HOURS * 3600),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_MINUTES * 60),
            history_token_budget: DEFAULT_HISTORY_TOKEN_BUDGET,
        }
    }
}

impl ConversationConfig {
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_history_token_budget(mut self, tokens: usize) -> Self {
        self.history_token_budget = tokens;
        self
    }
}

//! Token-budgeted views of a thread for prompt construction.

use super::entities::{ConversationTurn, ThreadContext};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Rough characters-per-token ratio used for budgeting.
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `content`.
pub fn estimate_tokens(content: &str) -> usize {
    content.len() / CHARS_PER_TOKEN
}

/// Selects the most recent turns of a thread that fit a token budget.
///
/// Turns are considered newest first; selection stops at the first turn
/// that would overflow the budget, and the result is returned in
/// chronological order.
#[derive(Debug, Clone, Copy)]
pub struct HistoryWindow {
    max_tokens: usize,
}

impl HistoryWindow {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn select(&self, turns: &[ConversationTurn]) -> Vec<ConversationTurn> {
        let mut used = 0;
        let mut selected: Vec<ConversationTurn> = turns
            .iter()
            .rev()
            .take_while(|turn| {
                let cost = estimate_tokens(&turn.content);
                if used + cost > self.max_tokens {
                    return false;
                }
                used += cost;
                true
            })
            .cloned()
            .collect();
        selected.reverse();
        selected
    }

    /// Markdown header describing the thread (id, start, tool, size).
    ///
    /// Lists the tools used when the thread spans more than one.
    pub fn summary(thread: &ThreadContext) -> String {
        let mut out = String::from("## Conversation Context\n\n");
        let _ = writeln!(out, "**Thread ID:** {}", thread.thread_id);
        let _ = writeln!(out, "**Started:** {}", thread.created_at.to_rfc3339());
        let _ = writeln!(out, "**Tool:** {}", thread.tool_name);
        let _ = writeln!(out, "**Turns:** {}", thread.turns.len());

        let tools: BTreeSet<&str> = thread
            .turns
            .iter()
            .filter_map(|t| t.tool_name.as_deref())
            .collect();
        if tools.len() > 1 {
            let _ = writeln!(
                out,
                "**Tools Used:** {}",
                tools.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        out
    }
}

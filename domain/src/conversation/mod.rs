//! Conversation domain.
//!
//! - [`entities::ConversationTurn`]: one role-tagged exchange
//! - [`entities::ThreadContext`]: one multi-turn conversation
//! - [`history::HistoryWindow`]: token-budgeted view of a thread for prompts

pub mod entities;
pub mod history;

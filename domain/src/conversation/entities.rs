//! Conversation domain entities

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exchange within a thread (Value Object)
///
/// Never modified after it has been appended to a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    /// Filled in by the thread store on append when left unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Tool that produced this turn (threads can be continued across tools)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Model that produced an assistant turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl ConversationTurn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
            files: Vec::new(),
            images: Vec::new(),
            tool_name: None,
            model_name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// One conversation (Entity)
///
/// Owned exclusively by the thread store; everything outside the store
/// works with cloned snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadContext {
    pub thread_id: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    /// Tool that created the thread
    pub tool_name: String,
    pub turns: Vec<ConversationTurn>,
}

impl ThreadContext {
    pub fn new(thread_id: impl Into<String>, tool_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            thread_id: thread_id.into(),
            created_at: now,
            last_updated_at: now,
            tool_name: tool_name.into(),
            turns: Vec::new(),
        }
    }

    /// Idle for longer than `ttl` as of `now`.
    pub fn is_expired(&self, ttl: TimeDelta, now: DateTime<Utc>) -> bool {
        now - self.last_updated_at > ttl
    }

    /// Append a turn, dropping the oldest turns first so that at most
    /// `max_turns` remain afterwards.
    ///
    /// `max_turns` of zero is treated as one.
    pub fn push_turn(&mut self, mut turn: ConversationTurn, max_turns: usize, now: DateTime<Utc>) {
        let max_turns = max_turns.max(1);
        if self.turns.len() >= max_turns {
            let excess = self.turns.len() + 1 - max_turns;
            self.turns.drain(..excess);
        }
        if turn.timestamp.is_none() {
            turn.timestamp = Some(now);
        }
        self.turns.push(turn);
        // never move backwards, even if the wall clock does
        if now > self.last_updated_at {
            self.last_updated_at = now;
        }
    }

    /// Unique file paths, most recently referenced first.
    pub fn recent_files(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.turns
            .iter()
            .rev()
            .flat_map(|turn| turn.files.iter())
            .filter(|f| seen.insert(f.as_str()))
            .cloned()
            .collect()
    }
}

/// Aggregate counters over the whole thread store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub thread_count: usize,
    pub total_turns: usize,
}

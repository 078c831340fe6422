//! In-memory thread store.
//!
//! One `RwLock<HashMap>` guards every thread. Mutations take the write lock;
//! pure reads share the read lock. Expiry is lazy: [`ThreadStore::get_thread`]
//! deletes an expired thread under an upgradable read, so no writer can
//! refresh the thread between the expiry check and the delete.

use crate::config::ConversationConfig;
use crate::error::StoreError;
use chrono::{TimeDelta, Utc};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use relay_domain::{ConversationTurn, StoreStats, ThreadContext};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

pub struct ThreadStore {
    threads: RwLock<HashMap<String, ThreadContext>>,
    max_turns: usize,
    ttl: TimeDelta,
}

impl ThreadStore {
    pub fn new(config: &ConversationConfig) -> Self {
        Self::with_limits(config.max_turns, config.ttl)
    }

    pub fn with_limits(max_turns: usize, ttl: Duration) -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
            max_turns: max_turns.max(1),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Create an empty thread with a fresh id.
    pub fn create_thread(&self, tool_name: &str) -> ThreadContext {
        let thread = ThreadContext::new(Uuid::new_v4().to_string(), tool_name, Utc::now());
        self.threads
            .write()
            .insert(thread.thread_id.clone(), thread.clone());
        debug!(thread_id = %thread.thread_id, tool = tool_name, "Created thread");
        thread
    }

    /// Snapshot of a live thread; an expired thread is removed and `None`
    /// returned.
    pub fn get_thread(&self, thread_id: &str) -> Option<ThreadContext> {
        let now = Utc::now();
        let threads = self.threads.upgradable_read();
        match threads.get(thread_id) {
            None => return None,
            Some(thread) if !thread.is_expired(self.ttl, now) => return Some(thread.clone()),
            Some(_) => {}
        }
        let mut threads = RwLockUpgradableReadGuard::upgrade(threads);
        threads.remove(thread_id);
        debug!(thread_id, "Removed expired thread on read");
        None
    }

    /// Append a turn, trimming the oldest turns to stay within `max_turns`.
    ///
    /// Appending to an expired thread removes it instead of reviving it.
    pub fn add_turn(&self, thread_id: &str, turn: ConversationTurn) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut threads = self.threads.write();
        let expired = match threads.get(thread_id) {
            None => return Err(StoreError::ThreadNotFound(thread_id.to_string())),
            Some(thread) => thread.is_expired(self.ttl, now),
        };
        if expired {
            threads.remove(thread_id);
            debug!(thread_id, "Removed expired thread on append");
            return Err(StoreError::ThreadNotFound(thread_id.to_string()));
        }
        if let Some(thread) = threads.get_mut(thread_id) {
            thread.push_turn(turn, self.max_turns, now);
            debug!(thread_id, turns = thread.turns.len(), "Appended turn");
        }
        Ok(())
    }

    /// Copy of the thread's turns; empty when unknown or expired.
    pub fn history(&self, thread_id: &str) -> Vec<ConversationTurn> {
        let now = Utc::now();
        self.threads
            .read()
            .get(thread_id)
            .filter(|t| !t.is_expired(self.ttl, now))
            .map(|t| t.turns.clone())
            .unwrap_or_default()
    }

    /// Files referenced in the thread, newest first, without repeats.
    pub fn file_list(&self, thread_id: &str) -> Vec<String> {
        let now = Utc::now();
        self.threads
            .read()
            .get(thread_id)
            .filter(|t| !t.is_expired(self.ttl, now))
            .map(|t| t.recent_files())
            .unwrap_or_default()
    }

    /// Remove every expired thread and return how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Utc::now();
        let mut threads = self.threads.write();
        let before = threads.len();
        threads.retain(|_, t| !t.is_expired(self.ttl, now));
        before - threads.len()
    }

    pub fn stats(&self) -> StoreStats {
        let threads = self.threads.read();
        StoreStats {
            thread_count: threads.len(),
            total_turns: threads.values().map(|t| t.turns.len()).sum(),
        }
    }

    /// Continue `continuation_id` when it names a live thread, otherwise
    /// start a new one.
    ///
    /// Unknown and expired ids always yield a new id.
    pub fn resolve_or_create(&self, continuation_id: Option<&str>, tool_name: &str) -> ThreadContext {
        if let Some(id) = continuation_id {
            if let Some(thread) = self.get_thread(id) {
                return thread;
            }
            debug!(thread_id = id, "Continuation unknown or expired, starting new thread");
        }
        self.create_thread(tool_name)
    }
}

//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases and
//! the thread store behave:
//!
//! - [`BehaviorConfig`]: model call limits (timeout)
//! - [`ConversationConfig`]: thread store limits and sweep cadence

pub mod behavior;
pub mod conversation;

pub use behavior::BehaviorConfig;
pub use conversation::ConversationConfig;

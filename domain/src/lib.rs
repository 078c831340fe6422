//! Domain layer for relay-council
//!
//! This crate contains the value types and pure rules of the system. It has
//! no dependencies on storage, providers or the process driver.
//!
//! # Core Concepts
//!
//! ## Threads
//!
//! A [`ThreadContext`] is one multi-turn conversation made of
//! [`ConversationTurn`]s. Any tool may continue a thread started by another
//! tool by passing its `continuation_id`.
//!
//! ## Workflow steps
//!
//! Workflow tools (`debug`, `thinkdeep`, ...) are driven one step at a time.
//! A step either returns guidance keyed by [`Confidence`] or finalizes,
//! optionally asking an expert model to review the consolidated findings.
//!
//! ## Consensus
//!
//! A consensus run consults an ordered list of (model, [`Stance`])
//! participants about one proposal and synthesizes their answers.

pub mod challenge;
pub mod chat;
pub mod consensus;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod workflow;

// Re-export commonly used types
pub use challenge::{CHALLENGE_SYSTEM_PROMPT, ChallengeRequest, ChallengeState};
pub use chat::{ChatRequest, ChatState};
pub use consensus::{
    ConsensusModel, ConsensusPhase, ConsensusRequest, ConsensusState, ModelResponseRecord, Stance,
    validate_participants,
};
pub use conversation::{
    entities::{ConversationTurn, Role, StoreStats, ThreadContext},
    history::{HistoryWindow, estimate_tokens},
};
pub use core::{
    error::ValidationError,
    model::{ModelCapabilities, ModelRequirements, select_best},
    string::truncate,
};
pub use prompt::{PromptTemplate, WorkflowPrompt};
pub use workflow::{
    Confidence, ThinkingDepth, WorkflowKind, WorkflowRequest, WorkflowState, consolidate_findings,
};

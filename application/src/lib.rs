//! Application layer for relay-council
//!
//! This crate contains the thread store, use cases and port definitions.
//! It depends only on the domain layer.

pub mod config;
pub mod conversation;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, ConversationConfig};
pub use conversation::{ThreadStore, ThreadSweeper};
pub use error::{ErrorCategory, StoreError, ToolError};
pub use ports::{
    model_catalog::ModelCatalog,
    model_gateway::{GatewayError, GenerateRequest, GenerateResponse, ModelGateway, TokenUsage},
};
pub use use_cases::{
    context::ToolContext,
    dispatch::{ToolDispatcher, ToolKind},
    output::ToolOutput,
    run_challenge::RunChallengeUseCase,
    run_chat::RunChatUseCase,
    run_consensus::RunConsensusUseCase,
    run_workflow::RunWorkflowUseCase,
};

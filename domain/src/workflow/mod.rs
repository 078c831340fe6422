//! Workflow step domain
//!
//! A workflow tool is driven by the caller one step at a time. Each call
//! carries a [`state::WorkflowRequest`] which is validated into a
//! [`state::WorkflowState`]; the state decides between returning guidance
//! (more steps to come) and finalizing (optionally with an expert model).
//!
//! - [`confidence::Confidence`]: how sure the caller is, selects guidance
//! - [`confidence::ThinkingDepth`]: reasoning budget hint for the provider
//! - [`kind::WorkflowKind`]: the closed set of workflow tools

pub mod confidence;
pub mod kind;
pub mod state;

pub use confidence::{Confidence, ThinkingDepth};
pub use kind::WorkflowKind;
pub use state::{WorkflowRequest, WorkflowState, consolidate_findings};

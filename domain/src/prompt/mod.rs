//! Prompt domain
//!
//! Text templates for every tool: consensus stance and synthesis prompts in
//! [`PromptTemplate`], workflow guidance and expert requests in
//! [`WorkflowPrompt`].

mod template;
mod workflow;

pub use template::{PRIOR_RESPONSE_LIMIT, PromptTemplate};
pub use workflow::WorkflowPrompt;

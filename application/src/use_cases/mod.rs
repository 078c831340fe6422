//! Use cases
//!
//! Application-level operations that orchestrate domain logic, one per tool
//! family, plus the dispatcher that routes a named call to them.

pub mod context;
pub mod dispatch;
pub mod output;
pub mod run_challenge;
pub mod run_chat;
pub mod run_consensus;
pub mod run_workflow;
pub mod server_info;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;

//! Model provider adapters
//!
//! Implementations of the [`ModelGateway`](relay_application::ModelGateway) port.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatGateway;

//! Infrastructure layer for relay-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod providers;

// Re-export commonly used types
pub use catalog::StaticModelCatalog;
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use providers::OpenAiCompatGateway;

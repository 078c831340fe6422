//! Configuration file loading for relay-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed with `RELAY_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./relay.toml` or `./.relay.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/relay-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileBehaviorConfig, FileConfig, FileConversationConfig, FileModelConfig,
    FileProviderConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};

//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for relay-council
#[derive(Parser, Debug)]
#[command(name = "relay-council")]
#[command(author, version, about = "Multi-model consultation server with persistent conversation threads")]
#[command(long_about = r#"
relay-council serves chat, workflow and consensus tools over stdin/stdout.
Each input line is a JSON object: {"tool": "<name>", "arguments": {...}}.
Each output line is {"ok": true, "result": ...} or {"ok": false, "error": ...}.

Configuration files are loaded from (in priority order):
1. RELAY_* environment variables (e.g. RELAY_CONVERSATION__MAX_TURNS=20)
2. --config <path>     Explicit config file
3. ./relay.toml        Project-level config
4. ~/.config/relay-council/config.toml   Global config

Example:
  echo '{"tool":"chat","arguments":{"prompt":"Hello"}}' | relay-council
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

//! CLI entrypoint for relay-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves tool calls over stdin/stdout.

mod args;
mod server;

use anyhow::{Result, bail};
use args::Cli;
use clap::Parser;
use relay_application::{ThreadStore, ThreadSweeper, ToolContext, ToolDispatcher, ToolKind};
use relay_infrastructure::{ConfigLoader, FileConfig, OpenAiCompatGateway, StaticModelCatalog};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        let config = load_config(&cli)?;
        println!("\nEffective configuration:\n{}", ConfigLoader::render(&config)?);
        return Ok(());
    }

    if cli.list_tools {
        for tool in ToolKind::all() {
            println!("{:<12} {}", tool.name(), tool.description());
        }
        return Ok(());
    }

    // stdout carries responses, so logs go to stderr
    let (log_writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    let config = load_config(&cli)?;
    check_config(&config)?;

    info!("Starting relay-council");

    // === Dependency Injection ===
    let conversation = config.conversation.to_conversation_config();
    let store = Arc::new(ThreadStore::new(&conversation));
    let catalog = Arc::new(StaticModelCatalog::from_config(&config.models));
    let api_key = config.provider.api_key();
    if api_key.is_none() {
        warn!(env = %config.provider.api_key_env, "No API key found, requests are sent unauthenticated");
    }
    let gateway = Arc::new(OpenAiCompatGateway::new(
        config.provider.base_url.clone(),
        api_key.as_deref(),
        config.provider.max_tokens,
    )?);

    let shutdown = CancellationToken::new();
    let sweeper = ThreadSweeper::spawn(
        Arc::clone(&store),
        conversation.sweep_interval,
        shutdown.clone(),
    );

    let context = ToolContext::new(gateway, catalog, Arc::clone(&store))
        .with_behavior(config.behavior.to_behavior_config())
        .with_history_token_budget(conversation.history_token_budget)
        .with_cancellation(shutdown.clone());
    let dispatcher = Arc::new(ToolDispatcher::new(context));

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        signal_token.cancel();
    });

    let result = server::serve(
        dispatcher,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        shutdown.clone(),
    )
    .await;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        error!(error = %e, "Thread sweeper task failed");
    }

    let stats = store.stats();
    info!(
        threads = stats.thread_count,
        turns = stats.total_turns,
        "relay-council stopped"
    );
    Ok(result?)
}

/// Resolve on SIGINT (ctrl-c) or, on unix, SIGTERM.
async fn wait_for_shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Interrupt received"),
        _ = terminate => info!("Terminate signal received"),
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    Ok(ConfigLoader::load(cli.config.as_deref())?)
}

/// Log configuration warnings and refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

//! AgriGenius CLI
//!
//! Entry point for the `agrigenius` binary: one-shot questions from the
//! terminal, or the HTTP server that front ends talk to.

mod commands;
mod server;

use agrigenius_core::{config::AppConfig, logging};
use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{AskCommand, GreetingCommand, LanguagesCommand, ServeCommand};
use std::path::PathBuf;
use tracing::Instrument;

/// AgriGenius - multilingual agricultural assistant
#[derive(Parser, Debug)]
#[command(name = "agrigenius")]
#[command(about = "Multilingual agricultural question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "AGRIGENIUS_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "AGRIGENIUS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Completion provider (together, ollama, none)
    #[arg(short, long, global = true, env = "AGRIGENIUS_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "AGRIGENIUS_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask an agriculture question
    Ask(AskCommand),

    /// Run the HTTP server
    Serve(ServeCommand),

    /// List supported languages
    Languages(LanguagesCommand),

    /// Print the welcome message for a language
    Greeting(GreetingCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Ask(_) => "ask",
            Commands::Serve(_) => "serve",
            Commands::Languages(_) => "languages",
            Commands::Greeting(_) => "greeting",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Secrets usually live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load()
        .context("Failed to load configuration")?
        .with_overrides(
            cli.workspace,
            cli.config,
            cli.provider,
            cli.model,
            cli.log_level,
            cli.verbose,
            cli.no_color,
        );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("AgriGenius starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.llm.provider);
    tracing::debug!("Model: {}", config.llm.model);

    let command_name = cli.command.name();
    let span = tracing::info_span!("command", name = command_name);

    let result = async {
        match cli.command {
            Commands::Ask(cmd) => cmd.execute(&config).await,
            Commands::Serve(cmd) => cmd.execute(&config).await,
            Commands::Languages(cmd) => cmd.execute(),
            Commands::Greeting(cmd) => cmd.execute(),
        }
    }
    .instrument(span)
    .await;

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result.with_context(|| format!("agrigenius {} failed", command_name))
}

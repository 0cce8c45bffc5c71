//! Hemolink CLI — the main entry point.
//!
//! Commands:
//! - `serve`       — Start the HTTP chatbot server
//! - `config-init` — Write a starter config file
//! - `ask`         — One-shot question through the full pipeline

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "hemolink",
    about = "Hemolink — blood donation chatbot service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file
    #[arg(short, long, global = true, default_value = "hemolink.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP chatbot server
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a starter config file
    ConfigInit,

    /// Ask a single question and print the reply
    Ask {
        /// The question text
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(&cli.config, host, port).await?,
        Commands::ConfigInit => commands::config_init::run(&cli.config)?,
        Commands::Ask { question } => commands::ask::run(&cli.config, question).await?,
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidekit_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "slidekit")]
#[command(author, version, about = "Replay touch and drag gestures against a carousel motion engine")]
struct Cli {
    /// Configuration file (defaults to ~/.config/slidekit/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture script on a simulated clock
    Simulate {
        /// Gesture script (TOML)
        #[arg(short = 's', long)]
        script: PathBuf,
        /// Print one JSON record per notification
        #[arg(long)]
        json: bool,
    },
    /// Replay a gesture script in real time
    Play {
        /// Gesture script (TOML)
        #[arg(short = 's', long)]
        script: PathBuf,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Simulate { script, json } => {
            commands::simulate::run(&config, &script, json).await
        }
        Commands::Play { script } => {
            commands::play::run(&config, &script).await
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::show(&config),
                ConfigAction::Init { force } => commands::config::init(force),
            }
        }
    }
}

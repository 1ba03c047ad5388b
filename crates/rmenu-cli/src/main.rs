mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmenu_router::Config;

#[derive(Parser)]
#[command(name = "rmenu")]
#[command(version, about = "RMenu - menu router table compiler", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "rmenu.toml")]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile module manifests and write the router table
    Compile {
        /// Module manifests (.toml or .json)
        #[arg(required = true)]
        manifests: Vec<PathBuf>,

        /// Output directory (overrides [output] dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compile module manifests and print routes as JSON
    Inspect {
        /// Module manifests (.toml or .json)
        #[arg(required = true)]
        manifests: Vec<PathBuf>,

        /// Canonical or runtime path to show
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    init_logging(&config, cli.verbose);

    // Execute command
    match cli.command {
        Commands::Compile { manifests, out } => {
            commands::compile::execute(&config, &manifests, out)?;
        }
        Commands::Inspect { manifests, path } => {
            commands::inspect::execute(&config, &manifests, path.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config
            .logging
            .level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! Currents CLI - builds the currents page from markdown entries.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "currents")]
#[command(about = "Builds the currents page from markdown entries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to currents.toml config file
    #[arg(short, long, default_value = "currents.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config file, entries directory and page in this project
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Render active entries into the page
    Build,

    /// Create a new entry
    New {
        /// Entry title
        #[arg(short, long)]
        title: String,

        /// Entry date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Entry status
        #[arg(short, long, default_value = "active")]
        status: String,
    },

    /// Start the development editing server
    Dev {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,

        /// Do not rebuild the page when entries change
        #[arg(long)]
        no_watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build => {
            let config = ConfigFile::load(&cli.config)?;
            commands::build::run(&config).await?;
        }
        Commands::New {
            title,
            date,
            status,
        } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::new::run(&config, title, date, status).await?;
        }
        Commands::Dev {
            port,
            no_open,
            no_watch,
        } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::dev::run(&config, port, !no_open, !no_watch).await?;
        }
    }

    Ok(())
}

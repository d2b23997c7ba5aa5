use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "channel-store")]
#[command(author, version, about = "Account and character persistence for the channel server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database path from the config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database if needed and apply pending migrations
    Migrate,

    /// Load an account with all its creatures and print a summary
    Account {
        /// Account id (login name)
        #[arg(required = true)]
        id: String,

        /// Print the full aggregate instead of a summary
        #[arg(long)]
        full: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (falls back to --config, then defaults)
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

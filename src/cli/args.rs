//! CLI argument definitions using clap
//!
//! Commands:
//! - momo-ledger init --config <path>
//! - momo-ledger serve --config <path> [--port <port>]
//! - momo-ledger compare --config <path> [--lookups <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// momo-ledger - HTTP store for mobile-money transaction records
#[derive(Parser, Debug)]
#[command(name = "momo-ledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./momo-ledger.json")]
        config: PathBuf,
    },

    /// Open the store and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./momo-ledger.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Time linear scans against keyed lookups over the stored records
    Compare {
        /// Path to configuration file
        #[arg(long, default_value = "./momo-ledger.json")]
        config: PathBuf,

        /// Number of ids to look up
        #[arg(long, default_value_t = 50)]
        lookups: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

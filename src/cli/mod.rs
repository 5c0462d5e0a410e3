//! CLI module for momo-ledger
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Open the store and serve the HTTP API
//! - compare: Linear scan vs keyed lookup timing

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compare, init, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;

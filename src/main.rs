//! momo-ledger CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and exits non-zero on
//! failure. All boot logic lives in `cli`.

use momo_ledger::cli;
use momo_ledger::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        Logger::fatal("CLI_FAILED", &[("code", e.code_str()), ("message", e.message())]);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

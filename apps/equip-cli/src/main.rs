//! # Equip Shell Entry Point
//!
//! Parses arguments and hands off to [`equip_cli::run`].
//!
//! ## Exit Codes
//! - `0` every requested change applied (or was already in place)
//! - `1` nothing ran: bad arguments, config, filter or database
//! - `2` a loan/return batch finished with per-id failures

use clap::Parser;
use std::process::ExitCode;

use equip_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    equip_cli::init_tracing(cli.verbose);

    match equip_cli::run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

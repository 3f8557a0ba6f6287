//! Stationery counter entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use stationery_counter::config::{Cli, CounterConfig};
use stationery_counter::console::StdConsole;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    stationery_counter::init_tracing();

    let config = match CounterConfig::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let db_config = match config.db_config() {
        Ok(db_config) => db_config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    match stationery_counter::run(&config, db_config, StdConsole::stdio()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Session aborted");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

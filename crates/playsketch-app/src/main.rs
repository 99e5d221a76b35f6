//! PlaySketch command-line entry point.

use clap::Parser;
use playsketch_app::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match playsketch_app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("playsketch: {e}");
            ExitCode::FAILURE
        }
    }
}

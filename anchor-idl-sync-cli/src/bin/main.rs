use anchor_idl_sync_cli::cli::{Cli, Options};
use anchor_idl_sync_cli::logging;
use anchor_idl_sync_cli::pipeline::Pipeline;
use anchor_idl_sync_cli::toolchain::SystemRunner;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let options = Options::from(Cli::parse());
    logging::init(options.verbose);

    match Pipeline::new(SystemRunner, &options).run() {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", format!("❌ {}", err).red());
            ExitCode::FAILURE
        }
    }
}

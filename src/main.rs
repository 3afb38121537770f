//! Command-line entry point for the linker binary.

use std::process::ExitCode;

use clap::Parser;
use linker::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Usage errors exit 1; --help and --version exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init_subscriber(args.verbose, "activate");
    let log = logging::Logger::new("activate");

    match commands::activate::run(&args, &log) {
        Ok(code) => code,
        Err(e) => {
            log.error(&format!("{e:#}"));
            if let Some(path) = log.log_path() {
                log.info(&format!("Full log: {}", path.display()));
            }
            ExitCode::FAILURE
        }
    }
}

//! Entry point for the `no` binary.
use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use no_cli::exec::SystemExecutor;
use no_cli::{cli, commands, interrupt, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();

    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            if let Some(usage) = commands::help::usage_after_error(&err) {
                let _ = writeln!(std::io::stderr(), "\n{usage}");
            }
            return ExitCode::from(cli::parse_error_exit_code(&err));
        }
    };

    let log_name = args.command.log_name();
    logging::init_subscriber(args.verbose, log_name);
    let log = Arc::new(logging::Logger::new(log_name));
    if let Some(path) = log.log_path() {
        log.debug(&format!("log: {}", path.display()));
    }

    if let Err(e) = interrupt::install() {
        log.debug(&format!("{e:#}"));
    }

    match commands::dispatch(&args, Arc::new(SystemExecutor), log.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

mod app;
mod cli;
mod config;
mod error;
mod logging;
mod prompt;

use std::process::ExitCode;

use clap::Parser;

use crate::app::Outcome;
use crate::cli::Cli;
use crate::error::AppError;
use crate::prompt::{ConsolePrompter, SavedTerminal};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let _log = logging::init(verbose);

    // Current-thread: the scoped subscriber above only covers this thread.
    let outcome = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => {
            let terminal = SavedTerminal::default();
            let prompter = ConsolePrompter::new(terminal.clone());
            let outcome = runtime.block_on(async {
                tokio::select! {
                    result = app::run(cli, prompter, app::connect) => result.map(|_| Outcome::Completed),
                    _ = tokio::signal::ctrl_c() => Ok(Outcome::Cancelled),
                }
            });
            // A cancelled prompt may still be blocked on stdin with echo off
            runtime.shutdown_background();
            if terminal.restore() {
                eprintln!();
            }
            outcome
        }
        Err(e) => Err(AppError::Unexpected(e.into())),
    };

    ExitCode::from(app::exit_status(outcome, verbose, &mut std::io::stderr()))
}

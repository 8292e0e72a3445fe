//! Console entry point for the QA board.
//!
//! # Responsibility
//! - Wire logging, the board database and the interactive shell together.
//! - Release the database on every exit path.

mod shell;

use qaboard_core::{default_log_level, init_logging, BoardGateway};
use shell::Shell;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "qaboard.sqlite3";
const LOG_DIR_NAME: &str = "qaboard-logs";

fn main() -> ExitCode {
    let db_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));

    let log_dir = std::env::temp_dir().join(LOG_DIR_NAME);
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let gateway = match BoardGateway::connect(&db_path) {
        Ok(gateway) => gateway,
        Err(err) => {
            eprintln!(
                "failed to open board database `{}`: {err}",
                db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(gateway, stdin.lock(), stdout.lock());
    let outcome = shell.run();
    shell.into_gateway().disconnect();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=shell_exit module=cli status=error error={err}");
            eprintln!("console error: {err}");
            ExitCode::FAILURE
        }
    }
}

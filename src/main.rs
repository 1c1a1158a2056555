mod cli;
mod config;
mod dispatch;
mod error;
mod exitcode;
mod fs;
mod handle;
mod output;
mod param;
mod secrets;
mod vault;

use config::{Config, LOG_ENV};
use dispatch::Dispatcher;
use error::Error;
use fs::FileSystemOperations;
use output::{write_result, TerminalOutput};
use secrets::StdinSecretReader;
use std::{env, io, process};
use tracing_subscriber::EnvFilter;
use vault::OnDiskVault;

fn main() {
    setup_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        process::exit(report(&e));
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &[String]) -> error::Result<()> {
    let config = Config::from_env(&FileSystemOperations)?;
    let vault = OnDiskVault::new(config.vault_dir, FileSystemOperations);
    let mut dispatcher = Dispatcher::new(vault, StdinSecretReader);
    let result = dispatcher.dispatch(args)?;
    write_result(result, TerminalOutput::new(io::stdout().lock())).map_err(Error::Terminal)
}

/// Print the error and return the exit code for it.
fn report(e: &Error) -> i32 {
    if let Error::Arguments(e) = e {
        // clap renders its own help and usage messages
        let _ = e.print();
    } else {
        eprintln!("Error: {e}");
    }
    e.exit_code()
}

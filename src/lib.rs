pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

use std::process::ExitCode;

/// CLI entry point: exit 0 when everything applied, 1 when any mod failed,
/// 2 when the config could not be read.
pub fn run() -> ExitCode {
    cli::run_from(std::env::args_os()).into()
}

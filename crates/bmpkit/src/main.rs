//! bmpkit - rotate and blur uncompressed bitmap files
//!
//! See `bmpkit --help` for the command list. Settings are read from
//! `bmpkit.toml` when present; command-line flags take precedence.

mod args;
mod config;
mod run;

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match args::parse_args(std::env::args_os().skip(1)).and_then(run::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

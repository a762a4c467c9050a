use clap::Parser;
use colored::*;
use organizer::cli::{Args, run_cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    match run_cli(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}

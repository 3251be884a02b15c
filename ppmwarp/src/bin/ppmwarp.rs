//! `ppmwarp` command line tool
//!
//! Set `RUST_LOG=debug` to see per-stage details.

use ppmwarp::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli: Cli = argh::from_env();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ppmwarp: {e}");
            ExitCode::FAILURE
        }
    }
}

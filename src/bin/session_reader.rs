use std::process::ExitCode;

use clap::Parser;
use session_maker::cli::ReaderArgs;
use session_maker::{logging, runner};

fn main() -> ExitCode {
    let args = ReaderArgs::parse();
    logging::init(args.verbosity.verbose);

    match runner::run_reader(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

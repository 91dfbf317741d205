use std::process::ExitCode;

use clap::Parser;
use session_maker::cli::MakerArgs;
use session_maker::{logging, runner};

fn main() -> ExitCode {
    let args = MakerArgs::parse();
    logging::init(args.verbosity.verbose);

    match runner::run_maker(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

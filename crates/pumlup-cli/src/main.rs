use pumlup_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    match Cli::run_from_args() {
        Ok(exit) => std::process::exit(exit.code()),
        Err(err) => {
            eprintln!("pumlup error: {:#}", err);
            std::process::exit(1);
        }
    }
}

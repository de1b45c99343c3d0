//! schemes entry point
//!
//! Sets up logging and the fatal panic hook, then delegates to the CLI.
//! Any error reaching this point is fatal.

use schemes::{cli, observability};

fn main() {
    observability::init_logging();
    observability::install_panic_hook();

    if let Err(e) = cli::run() {
        tracing::error!(error = %e, "fatal");
        std::process::exit(1);
    }
}

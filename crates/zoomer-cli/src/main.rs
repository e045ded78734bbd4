use zoomer_core::{config, logging};

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Load settings first so debug_mode can shape the log filter.
    let settings = config::load_or_init().unwrap_or_else(|err| {
        eprintln!("zoomer: falling back to default settings: {err:#}");
        config::Settings::default()
    });

    if logging::init_logging(settings.debug_mode).is_err() {
        logging::init_logging_stderr(settings.debug_mode);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args(settings).await {
        eprintln!("zoomer error: {err:#}");
        std::process::exit(1);
    }
}

mod cli;
mod controller;
mod state;
mod sync;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use controller::Controller;

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("retile=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "retile=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("retile v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("using config override: {}", path.display());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_for_handler = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        shutdown_for_handler.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!("failed to install interrupt handler: {e}");
    }

    let probe = retile_platform::create_probe();
    let mut controller = Controller::new(probe, args.config, shutdown.clone());

    match controller.run() {
        Ok(()) => {
            tracing::info!("shutdown complete");
        }
        Err(e) => {
            tracing::error!("fatal: {e}");
            std::process::exit(1);
        }
    }
}

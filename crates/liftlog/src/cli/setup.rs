//! Logging initialisation

use anyhow::Result;
use tracing::Level;

/// Initialize tracing subscriber for logging
///
/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// directives are honoured; the base level is INFO, or DEBUG with
/// `--verbose`.
///
/// # Errors
/// Returns an error if a subscriber is already installed
pub fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

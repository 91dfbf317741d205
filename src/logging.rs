//! Log output for the binaries.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here bridges those records into `tracing` and prints them to stderr as
//! level-prefixed lines without timestamps or targets.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count: warnings, then info, then debug.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`. A second
/// call is a no-op.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

//! Tracing subscriber setup
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=hotkeyd=debug` - every activation and registration
//! - `RUST_LOG=hotkeyd::exec=debug` - child process exits only
//!
//! Without RUST_LOG the filter is `hotkeyd=info`, or `hotkeyd=debug` when
//! `--verbose` is given. Output goes to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when RUST_LOG is unset or invalid.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "hotkeyd=debug"
    } else {
        "hotkeyd=info"
    }
}

/// Installs the global subscriber. A second call is ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_thread_names(verbose)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}

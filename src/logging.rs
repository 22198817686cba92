//! Diagnostics go to stderr; stdout carries only the status line.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise only
/// warnings are shown, or everything from this crate with `debug`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let fallback = if debug { "cc_statusline=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

//! Diagnostic logging via `tracing`.
//!
//! Diagnostics go to stderr so they never mix with script paths or `--json`
//! output on stdout. `RUST_LOG` takes precedence over `--verbose`.

use tracing_subscriber::EnvFilter;

/// Default filter: warnings only, or everything from this crate with `-v`.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,trmm_lam=debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}

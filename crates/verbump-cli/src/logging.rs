//! Log setup
//!
//! Logs go to stderr so the report on stdout stays clean. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "verbump_core=info,verbump_cli=info";
const QUIET_FILTER: &str = "warn";

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(quiet: bool) {
    let default = if quiet { QUIET_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

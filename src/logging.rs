//! Tracing bootstrap for the `noir` binary.
//!
//! Diagnostics go to stderr so command output on stdout stays scriptable.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};

const DEFAULT_RUST_LOG: &str = "noir=warn";
const VERBOSE_RUST_LOG: &str = "noir=debug";

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_RUST_LOG
    } else {
        DEFAULT_RUST_LOG
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

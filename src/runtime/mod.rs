//! # Runtime
//!
//! Process-level plumbing shared by the binary and the tests: the tracing
//! subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Initializes structured logging for the process.
///
/// The default level follows the `-v` count (`info`, `debug`, `trace`); a
/// `RUST_LOG` directive overrides it entirely. Safe to call once per
/// process.
pub fn setup_tracing(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

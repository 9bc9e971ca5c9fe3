//! Logging setup for the zone-finder CLI.
//!
//! Diagnostics go to stderr so they never mix with the zone table on
//! stdout. `RUST_LOG` overrides the `-v` flag when set.

use tracing_subscriber::{fmt, EnvFilter};

/// Map `-v` occurrences to a log level for this crate.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging system.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("zone_finder={}", level_for_verbosity(verbosity)))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

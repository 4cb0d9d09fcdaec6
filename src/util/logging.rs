//! Logging configuration and initialization
//!
//! All log output goes to standard error; standard output is reserved for the
//! result line.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
///
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for a binary
///
/// `RUST_LOG` takes precedence over the verbosity-derived level when set.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    // A subscriber may already be installed (tests, embedding); keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .try_init();
}

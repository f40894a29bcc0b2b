// Logging setup for hosts of the pipeline
//
// The library only emits `tracing` events; a host installs a subscriber once.
// Per-file load chatter is at debug, isolated year failures at warn.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter: warnings and the "no accidents to plot" notice.
pub const DEFAULT_LEVEL: &str = "info";

/// Install a stderr `fmt` subscriber filtered at `level` (e.g. `"info"`,
/// `"fars_analysis=debug"`).
///
/// An unparsable filter falls back to [`DEFAULT_LEVEL`]. Returns `false` if a
/// global subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("debug");
        assert!(!init_logging("not a [valid filter"));
    }
}

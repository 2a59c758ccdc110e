//! Tracing subscriber setup. Logs go to stderr so stdout carries only
//! generated output.

use tracing_subscriber::EnvFilter;

/// Level implied by `-v`/`-q`, or `None` to defer to `RUST_LOG`.
#[must_use]
pub const fn flag_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("info"),
        (false, 2) => Some("debug"),
        (false, _) => Some("trace"),
    }
}

/// Install the global subscriber.
///
/// Explicit flags win over `RUST_LOG`; with neither, only warnings and
/// errors are shown.
pub fn init(verbose: u8, quiet: bool) {
    let filter = match flag_level(verbose, quiet) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // A second init (tests, embedding) keeps the first subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_everything() {
        assert_eq!(flag_level(0, true), Some("error"));
        assert_eq!(flag_level(3, true), Some("error"));
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(flag_level(0, false), None);
        assert_eq!(flag_level(1, false), Some("info"));
        assert_eq!(flag_level(2, false), Some("debug"));
        assert_eq!(flag_level(7, false), Some("trace"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(0, false);
        init(2, true);
    }
}

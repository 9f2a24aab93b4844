use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "STRICT_GUARD_LOG";

/// Default filter level for the given verbosity flags.
#[must_use]
pub const fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `STRICT_GUARD_LOG` if set and valid, else the verbosity default.
#[must_use]
pub fn build_filter(directive: Option<&str>, verbose: u8, quiet: bool) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level(verbose, quiet)))
}

/// Install the global subscriber writing to stderr. Later calls are no-ops.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let directive = std::env::var(LOG_ENV).ok();
    let filter = build_filter(directive.as_deref(), verbose, quiet);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays clean for results. The level comes from
//! `-v`/`-q` unless `PSTAT_LOG` holds an explicit filter directive. JSON output
//! mode switches the log lines to JSON as well.

use pstat_common::OutputFormat;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV_VAR: &str = "PSTAT_LOG";

/// Filter directive implied by the verbosity flags.
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(verbosity: u8, quiet: bool, format: OutputFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    // Already-installed subscribers (tests, embedding) win.
    let _ = if format.is_json() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

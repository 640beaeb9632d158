//! Structured logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "DAYPOST_LOG";

/// Initialize logging to stderr.
///
/// `DAYPOST_LOG` takes precedence; otherwise `verbose` selects debug over warn.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "daypost=debug"
    } else {
        "daypost=warn"
    }
}

//! Logging setup.

use time::macros::format_description;
use tracing_subscriber::{
    fmt::{format::FmtSpan, time::UtcTime},
    EnvFilter,
};

/// Directives used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVES: &str = "honk=warn,poly_commitment=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Installs a console subscriber on stderr. Prove and verify spans are
/// reported with their duration when they close. Does nothing if a global
/// subscriber is already set.
pub fn init_console_subscriber() {
    let timer = UtcTime::new(format_description!(
        "[hour repr:24]:[minute]:[second].[subsecond digits:3]Z"
    ));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}

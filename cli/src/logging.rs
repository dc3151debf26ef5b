//! Diagnostic tracing.
//!
//! Events go to stderr so they never interleave with rendered results on
//! stdout. User-facing messages go through `OutputContext` instead.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "ESHOST_LOG";

/// Initialize the tracing subscriber.
///
/// Reads `ESHOST_LOG`, then `RUST_LOG`. Defaults to `warn` if neither is set.
///
/// ```bash
/// ESHOST_LOG=eshost_cli=debug eshost -e 'print(1)'
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

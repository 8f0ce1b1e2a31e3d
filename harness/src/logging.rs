//! Diagnostic tracing for the `cavern` binary.
//!
//! Libraries in this workspace only emit `tracing` events; installing a
//! subscriber is left to binaries. Episode reports are the product output
//! and do not depend on `RUST_LOG`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Compact format.
///
/// ```bash
/// RUST_LOG=cavern_search=debug cavern run --world ring4
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

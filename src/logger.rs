pub use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Filtering follows `RUST_LOG`, defaulting
/// to `info`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .init();
}

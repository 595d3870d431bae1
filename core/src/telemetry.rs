// Tracing bootstrap shared by the binaries
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info,clarity_core=info,clarity_server=info";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, or `info` when it is unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Timestamped console logging, the only output the proxy has besides its exit status.
pub fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .init();
}

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVES: &str = "pledgemap_core=info,pledgemap_cli=info,pledgemap_app=info";

/// Install the fmt subscriber. `RUST_LOG` wins; otherwise info for this
/// workspace's crates only.
/// Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

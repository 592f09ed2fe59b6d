use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Env var holding the log filter, e.g. `FINTRACK_LOG=fintrack=debug`.
pub const LOG_ENV: &str = "FINTRACK_LOG";

/// Install the stderr subscriber once. Defaults to `warn` so report output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

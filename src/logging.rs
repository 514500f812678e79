use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, writing to stderr.
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug over warn.
pub fn init(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let directive = if verbose { "sente=debug" } else { "sente=warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

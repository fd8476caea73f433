use std::sync::Once;

use tracing_subscriber::{fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Installs a compact stderr logger, once.
///
/// Set the `RUST_LOG` environment variable to `debug` to see per-line decode events, or `trace`
/// for operand classification.
pub fn setup_logger() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

        tracing_subscriber::fmt::Subscriber::builder()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(env_filter)
            .with_span_events(FmtSpan::CLOSE)
            .finish()
            .init();
    });
}

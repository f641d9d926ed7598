//! Tracing initialization

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `GATEWAY_LOG=gateway_survey=debug`
pub const LOG_ENV: &str = "GATEWAY_LOG";

static INIT: Once = Once::new();

/// Install the fmt subscriber, filtered by [`LOG_ENV`] (default `info`)
///
/// Logs go to stderr so the printed report stays clean. Calling this more
/// than once has no effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

//! Subscriber initialization.

use crate::TableOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global subscriber with an `EnvFilter` and a fmt layer.
///
/// Idempotent: if a global subscriber is already set, by an earlier call or by the
/// host, the call does nothing.
///
/// # Parameters
///
/// * `options` - Table options; only `trace_level` is read
pub fn init_tracing(options: &TableOptions) {
    let level = options
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));

    if subscriber.try_init().is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}

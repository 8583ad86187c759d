//! Observability infrastructure: tracing initialization.
//!
//! Synthesis works without calling `init`, but emits no diagnostics.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Call once at application startup. Returns an error if a subscriber is
/// already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(true).with_level(true))
        .try_init()?;
    Ok(())
}

//! Console logging for the payroll report binary.
//!
//! Progress and error lines go to stdout through `tracing`. The level defaults
//! to `info` and can be overridden with `RUST_LOG`.

use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Installs the global console subscriber.
///
/// # Errors
///
/// Returns error if the filter cannot be built or a subscriber is already installed.
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()
        .context("Failed to install logging subscriber")?;

    Ok(())
}

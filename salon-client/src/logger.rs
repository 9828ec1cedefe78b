//! Logging setup
//!
//! Console-only `tracing` subscriber for applications embedding the client.
//! `RUST_LOG` overrides the configured level.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ClientConfig;

/// Initialize the global subscriber
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "salon_client=trace")
/// * `json_format` - JSON lines instead of human-readable output
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry();

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}

/// Initialize logging from a [`ClientConfig`]
pub fn init_from_config(config: &ClientConfig) -> anyhow::Result<()> {
    init_logger(&config.log_level, config.log_json)
}

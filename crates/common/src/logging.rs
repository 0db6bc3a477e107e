//! Logging and tracing initialization.
//!
//! Logs go to stderr so that event output on stdout stays machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Level used when the configured filter cannot be parsed.
const FALLBACK_LEVEL: &str = "info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns false if a subscriber
/// was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(log_filter(config))
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish()).is_ok()
    } else {
        tracing::subscriber::set_global_default(builder.compact().finish()).is_ok()
    }
}

fn log_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

//! Logging utilities

pub use log::{debug, info, warn, error, trace};

use crate::core::config::LoggingConfig;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// if a logger was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    let env = env_logger::Env::default().default_filter_or(config.level.as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if !config.timestamps {
        builder.format_timestamp(None);
    }
    builder.try_init().is_ok()
}

//! Structured logging with tracing
//!
//! Centralized logging configuration using the tracing ecosystem.
//! The `SQB_LOG` environment variable overrides the configured level with a
//! full `EnvFilter` directive string.

use sqb_domain::error::{Error, Result};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env("SQB_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level));

    // The json layer is a different type, so the branches cannot share a builder
    if config.json_format {
        let stdout = fmt::layer().json().with_target(true);
        Registry::default().with(filter).with(stdout).init();
    } else {
        let stdout = fmt::layer().with_target(true);
        Registry::default().with(filter).with(stdout).init();
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &std::path::Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

// logging.rs
use anyhow::{Result, anyhow};
use courseconfig::Config;
use tracing::Level;
use tracing_subscriber::{Registry, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Convertit un nom de niveau ("debug", "WARN"...) en `Level`
pub fn string_to_level(level: &str) -> Option<Level> {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" => Some(Level::ERROR),
        _ => None,
    }
}

/// Level filter from `host.logger.min_level`, INFO when unset or unknown.
pub fn configured_level(config: &Config) -> LevelFilter {
    config
        .get_log_min_level()
        .ok()
        .and_then(|l| string_to_level(&l))
        .map(LevelFilter::from_level)
        .unwrap_or(DEFAULT_LEVEL)
}

/// Initialise le système de logging
///
/// Installs a global subscriber filtered at the configured level, with a
/// console layer when `host.logger.enable_console` is set. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &Config) -> Result<()> {
    let enable_console = config.get_log_enable_console().unwrap_or(true);

    let console = enable_console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(true)
    });

    Registry::default()
        .with(configured_level(config))
        .with(console)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

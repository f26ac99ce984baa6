//! Environment-driven logging configuration and global switches.

use crate::{Format, Level};
use once_cell::sync::Lazy;
use std::env;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Checked by the macros before a record is formatted.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from `DATASHAPE_*` variables.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
    /// Whether to include timestamps
    pub timestamps: bool,
    /// Whether to include the target (module path)
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
            module_path: true,
        }
    }
}

fn flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Read the configuration from the environment and publish the level and
    /// debug flag to the global switches.
    ///
    /// - `DATASHAPE_DEBUG=1` enables debug records
    /// - `DATASHAPE_LOG_LEVEL=trace|debug|info|warn|error|off`
    /// - `DATASHAPE_LOG_FORMAT=pretty|compact|json`
    /// - `DATASHAPE_LOG_COLOR=1|0`
    /// - `DATASHAPE_LOG_TIMESTAMPS=1|0`
    /// - `DATASHAPE_LOG_MODULE=1|0`
    pub fn from_env() -> Self {
        let debug = flag("DATASHAPE_DEBUG").unwrap_or(false);

        let level = env::var("DATASHAPE_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = env::var("DATASHAPE_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Json);

        let config = Self {
            debug,
            level,
            format,
            color: flag("DATASHAPE_LOG_COLOR").unwrap_or_else(stderr_supports_color),
            timestamps: flag("DATASHAPE_LOG_TIMESTAMPS").unwrap_or(true),
            module_path: flag("DATASHAPE_LOG_MODULE").unwrap_or(true),
        };

        DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
        LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);

        config
    }
}

fn stderr_supports_color() -> bool {
    env::var("NO_COLOR").is_err() && env::var("TERM").is_ok()
}

/// Initialize the logging system eagerly.
///
/// Happens implicitly on the first emitted record.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The global configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Check if debug logging is enabled.
#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Check if a log level is enabled.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Whether a record at `level` should be emitted. Debug records are also let
/// through when the debug flag is on.
#[inline]
pub fn enabled(level: Level) -> bool {
    is_level_enabled(level) || (level == Level::Debug && is_debug_enabled())
}

/// Current minimum level.
pub fn current_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level at runtime.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Enable or disable debug mode at runtime.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

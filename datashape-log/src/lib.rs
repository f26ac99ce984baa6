//! Datashape Logging
//!
//! Structured logging shared by the datashape crates, configured through
//! `DATASHAPE_*` environment variables.
//!
//! # Usage
//!
//! ```rust
//! use datashape_log::{debug, info, trace, warn, error};
//!
//! debug!("Admitting value");
//! info!("Loaded {} messages", 12);
//! warn!(target: "datashape::i18n", "Catalog {} missing", "profile");
//! error!("Schema has no fields");
//!
//! // Structured fields follow a `;`
//! let missing = 2;
//! debug!(target: "datashape::validation", "validation finished"; errors = missing, request = "profile");
//! ```
//!
//! # Environment Variables
//!
//! - `DATASHAPE_DEBUG=1` - Enable debug logging
//! - `DATASHAPE_LOG_LEVEL=debug|info|warn|error` - Set log level
//! - `DATASHAPE_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `DATASHAPE_LOG_COLOR=1|0` - Enable/disable colors

mod config;
mod level;
mod output;

pub use config::{
    LogConfig, config, current_level, enabled, init, is_debug_enabled, is_level_enabled,
    set_debug, set_level,
};
pub use level::{Format, Level};
pub use output::{Field, LogBridge, install_log_bridge, log, log_fields};

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, target: $target:expr, $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {
        if $crate::enabled($level) {
            $crate::log_fields(
                $level,
                $target,
                &format!($fmt $(, $arg)*),
                &[$((stringify!($key), &$value as &dyn ::std::fmt::Display)),+],
            );
        }
    };
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::enabled($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {
        $crate::__log!($level, target: module_path!(), $fmt $(, $arg)* ; $($key = $value),+)
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__log!($level, target: module_path!(), $($arg)+)
    };
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Trace, $($arg)+) };
}

/// Log a debug message.
///
/// Emitted when `DATASHAPE_DEBUG=1` or the level is `debug` or lower.
///
/// ```rust
/// use datashape_log::debug;
///
/// let key = "alice@example.com";
/// debug!(target: "datashape::collection", "Admitted {}", key);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Debug, $($arg)+) };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Info, $($arg)+) };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Warn, $($arg)+) };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Error, $($arg)+) };
}

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Tracing subscriber that honours the datashape log level.

    use super::*;

    /// Build a subscriber filtered at the configured level unless `RUST_LOG`
    /// overrides it.
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }
}

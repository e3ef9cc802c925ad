#![deny(missing_docs)]
//! Shared logging utilities for the search tool workspace.
//!
//! Library code logs through the `yacy_*` macros so the backend can be chosen by
//! the binary (or by tests) without touching call sites.

use log::LevelFilter;

/// Environment variable that overrides the default log level.
pub const LOG_LEVEL_ENV: &str = "YACY_LOG";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! yacy_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! yacy_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! yacy_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! yacy_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! yacy_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Resolves the log level from [`LOG_LEVEL_ENV`], falling back to `default`.
///
/// Accepts the usual `log` level names (`off`, `error`, `warn`, `info`, `debug`,
/// `trace`), case-insensitively.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or(default)
}

/// Initializes a simple stderr logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let default = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level_from_env(default),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}

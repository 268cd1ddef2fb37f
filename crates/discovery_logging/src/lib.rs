#![deny(missing_docs)]
//! Shared logging utilities for the discovery workspace.
//!
//! This crate provides the `discovery_*` logging macros used across the
//! codebase, the level lookup shared by the app and tests, and a minimal
//! test initializer for the global logger.

use std::str::FromStr;

#[doc(hidden)]
pub use log;

/// Log target used by every `discovery_*` macro.
pub const TARGET: &str = "discovery";

/// Environment variable consulted for the log level.
pub const LEVEL_ENV: &str = "DISCOVERY_LOG";

/// Logs a trace-level message under the discovery target.
#[macro_export]
macro_rules! discovery_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the discovery target.
#[macro_export]
macro_rules! discovery_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the discovery target.
#[macro_export]
macro_rules! discovery_info {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the discovery target.
#[macro_export]
macro_rules! discovery_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the discovery target.
#[macro_export]
macro_rules! discovery_error {
    ($($arg:tt)*) => {{
        $crate::log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Resolves the log level from `DISCOVERY_LOG`, falling back to `default`.
///
/// Unknown values fall back as well, so a typo never silences logging.
pub fn level_from_env(default: log::LevelFilter) -> log::LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| log::LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(default)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let default = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level_from_env(default),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

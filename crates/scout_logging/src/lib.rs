#![deny(missing_docs)]
//! Shared logging utilities for the scout workspace.
//!
//! This crate provides the `scout_*` logging macros used across the codebase,
//! a helper for keeping session credentials out of log lines, and a minimal
//! test initializer for the global logger.

/// Number of leading characters of a credential kept visible by [`redact`].
const REDACT_VISIBLE: usize = 4;

/// Renders a credential for log output: a short visible prefix plus its length.
///
/// Short values are fully masked.
pub fn redact(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= REDACT_VISIBLE * 2 {
        return format!("***({len})");
    }
    let visible: String = secret.chars().take(REDACT_VISIBLE).collect();
    format!("{visible}***({len})")
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scout_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scout_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scout_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scout_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scout_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Only our own crates; reqwest/hyper chatter drowns the interesting lines.
    let config = ConfigBuilder::new()
        .add_filter_allow_str("scout")
        .build();

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn redact_keeps_prefix_and_length() {
        assert_eq!(redact("AQEDAR0123456789"), "AQED***(16)");
    }

    #[test]
    fn redact_masks_short_values_entirely() {
        assert_eq!(redact("abc"), "***(3)");
        assert_eq!(redact(""), "***(0)");
    }
}

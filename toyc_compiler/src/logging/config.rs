//! Logging settings
//!
//! Buffer and message limits are compile-time constants; verbosity and
//! output format come from the runtime preferences installed at startup.

use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install the preferences; fails if anything was logged or installed before
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Installed preferences, or the environment defaults on first use
pub fn preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

pub fn include_file_context() -> bool {
    preferences().include_file_context
}

/// Events retained by the in-memory logger
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 || LOG_BUFFER_SIZE > 1_000_000 {
        return Err(format!("Log buffer size out of range: {}", LOG_BUFFER_SIZE));
    }
    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_limits_are_valid() {
        assert!(validate_config().is_ok());
        assert!(get_max_log_message_length() >= 80);
    }

    #[test]
    fn test_preferences_fall_back_to_defaults() {
        let level = get_min_log_level();
        assert!(level >= LogLevel::Error);
    }
}

// Runtime preferences
//
// Each preference defaults from a TOYC_* environment variable. A whole
// `RuntimeConfig` can also be read from TOML; missing keys keep their
// environment defaults.

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Parsed value of `name`, or `default` when unset or unparsable
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Reject inputs without a .c extension
    pub require_c_extension: bool,
    /// Attach size and timing to the success event
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_c_extension: env_or(env_vars::REQUIRE_C_EXTENSION, false),
            enable_performance_logging: env_or(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Only fold a `+`/`-` into the following integer when the previous
    /// token cannot end an operand. Off keeps the unconditional fold.
    pub contextual_signs: bool,
    /// Per-kind token counts
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            contextual_signs: env_or(env_vars::LEXICAL_CONTEXTUAL_SIGNS, false),
            collect_detailed_metrics: env_or(env_vars::LEXICAL_DETAILED_METRICS, true),
        }
    }
}

/// Which listing the CLI writes on success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Symbols,
    Tokens,
    Cst,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Symbols => "symbols",
            ReportKind::Tokens => "tokens",
            ReportKind::Cst => "cst",
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind.to_lowercase().as_str() {
            "symbols" | "symbol" | "table" => Ok(ReportKind::Symbols),
            "tokens" | "token" => Ok(ReportKind::Tokens),
            "cst" | "tree" => Ok(ReportKind::Cst),
            other => Err(format!("unknown report kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPreferences {
    pub report_kind: ReportKind,
    /// Also write the comment-blanked source next to the input
    pub write_cleaned_source: bool,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            report_kind: env_or(env_vars::REPORT_KIND, ReportKind::Symbols),
            write_cleaned_source: env_or(env_vars::REPORT_WRITE_CLEANED_SOURCE, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// JSON lines instead of text
    pub use_structured_logging: bool,
    /// Off keeps events in memory only
    pub enable_console_logging: bool,
    pub min_log_level: LogLevel,
    /// Tag events with the file being processed
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env_or(env_vars::LOGGING_MIN_LEVEL, LogLevel::Warning),
            include_file_context: env_or(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read runtime config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid runtime config {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub report: ReportPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, RuntimeConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| RuntimeConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| RuntimeConfigError::Parse {
            path: display,
            message: e.to_string(),
        })
    }

    /// File named by `TOYC_RUNTIME_CONFIG` when set, otherwise defaults
    pub fn from_env() -> Result<Self, RuntimeConfigError> {
        match env::var(env_vars::RUNTIME_CONFIG) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}

pub mod env_vars {
    pub const RUNTIME_CONFIG: &str = "TOYC_RUNTIME_CONFIG";

    pub const REQUIRE_C_EXTENSION: &str = "TOYC_REQUIRE_C_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "TOYC_ENABLE_PERFORMANCE_LOGGING";

    pub const LEXICAL_CONTEXTUAL_SIGNS: &str = "TOYC_LEXICAL_CONTEXTUAL_SIGNS";
    pub const LEXICAL_DETAILED_METRICS: &str = "TOYC_LEXICAL_DETAILED_METRICS";

    pub const REPORT_KIND: &str = "TOYC_REPORT_KIND";
    pub const REPORT_WRITE_CLEANED_SOURCE: &str = "TOYC_REPORT_WRITE_CLEANED_SOURCE";

    pub const LOGGING_USE_STRUCTURED: &str = "TOYC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TOYC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TOYC_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "TOYC_LOGGING_INCLUDE_FILE_CONTEXT";
}

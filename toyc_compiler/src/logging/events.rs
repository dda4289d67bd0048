//! Log events and their text and JSON renderings

use super::codes::{Code, ErrorMetadata};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[serde(alias = "Error", alias = "error")]
    Error,
    #[serde(rename = "WARN", alias = "Warning", alias = "warning", alias = "warn")]
    Warning,
    #[serde(alias = "Info", alias = "info")]
    Info,
    #[serde(alias = "Debug", alias = "debug")]
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Names in any case, or 0-3
    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.to_lowercase().as_str() {
            "error" | "0" => Ok(LogLevel::Error),
            "warning" | "warn" | "1" => Ok(LogLevel::Warning),
            "info" | "2" => Ok(LogLevel::Info),
            "debug" | "3" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Placeholder codes for events that carry no registered code
const GENERIC_WARNING: Code = Code::new("W000");
const GENERIC_INFO: Code = Code::new("I000");
const GENERIC_DEBUG: Code = Code::new("D000");

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Ordered so repeated runs print identical lines
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: truncate_message(message).to_string(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(code: Option<Code>, message: &str) -> Self {
        Self::new(LogLevel::Warning, code.unwrap_or(GENERIC_WARNING), message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, GENERIC_INFO, message)
    }

    /// Info event carrying a success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, GENERIC_DEBUG, message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        self.code.metadata()
    }

    fn location(&self) -> Option<String> {
        match (&self.span, self.context.get("line")) {
            (Some(span), _) => Some(span.to_string()),
            (None, Some(line)) => Some(format!("line {}", line)),
            (None, None) => None,
        }
    }

    /// One JSON object per event; registered codes add their metadata
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Record<'a> {
            #[serde(flatten)]
            event: &'a LogEvent,
            #[serde(skip_serializing_if = "Option::is_none")]
            metadata: Option<&'static ErrorMetadata>,
        }

        serde_json::to_string(&Record {
            event: self,
            metadata: self.metadata(),
        })
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.level.as_str(), self.code, self.message)?;
        if let Some(location) = self.location() {
            write!(f, " at {}", location)?;
        }
        Ok(())
    }
}

fn truncate_message(message: &str) -> &str {
    let limit = super::config::get_max_log_message_length();
    match message.char_indices().nth(limit) {
        Some((cut, _)) => &message[..cut],
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_error_event_text() {
        let event = LogEvent::error(codes::symbols::DUPLICATE_GLOBAL, "Duplicate")
            .with_context("name", "x")
            .with_context("line", "3");

        assert!(event.is_error());
        assert_eq!(event.to_string(), "[ERROR] E091 - Duplicate at line 3");
    }

    #[test]
    fn test_span_wins_over_line_context() {
        let event = LogEvent::error(codes::lexical::INVALID_CHARACTER, "Invalid character")
            .with_span(Span::single(Position::new(4, 2, 5)))
            .with_context("line", "2");

        assert_eq!(event.to_string(), "[ERROR] E020 - Invalid character at 2:5");
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("2".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(LogEvent::warning(None, "generic").code.as_str(), "W000");

        let stray = LogEvent::warning(Some(codes::comments::STRAY_TERMINATOR), "stray");
        assert!(stray.is_warning());
        assert!(stray.metadata().is_some_and(|m| m.recoverable));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::file_processing::PERMISSION_DENIED, "Access denied")
            .with_context("file", "prog.c");

        let json = event.format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["code"], "E009");
        assert_eq!(value["context"]["file"], "prog.c");
        assert_eq!(value["metadata"]["category"], "FileProcessing");
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_success_json_has_no_metadata() {
        let event = LogEvent::success(codes::success::REPORT_WRITTEN, "written");
        let value: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(value["level"], "INFO");
        assert!(value.get("metadata").is_none());
        assert!(value.get("span").is_none());
    }
}

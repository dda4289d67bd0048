//! Process-wide logging for the toyc front end
//!
//! One `LoggingService` is installed at startup. Events raised while a file
//! is being processed are tagged with that file through a thread-local
//! context. Nothing is emitted before the service is installed.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleFormat, ConsoleLogger, Logger, LoggingService, MemoryLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

/// The file currently being processed on this thread
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
        }
    }
}

/// Install the global service; runs once at startup
pub fn init_global_logging_with_preferences(
    preferences: LoggingPreferences,
) -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    config::init_runtime_preferences(preferences)?;

    codes::ensure_registered(&[
        codes::system::INTERNAL_ERROR,
        codes::system::INITIALIZATION_FAILURE,
        codes::file_processing::FILE_NOT_FOUND,
        codes::lexical::UNTERMINATED_STRING,
        codes::structure::NEGATIVE_ARRAY_SIZE,
        codes::symbols::DUPLICATE_GLOBAL,
    ])?;

    let service = Arc::new(LoggingService::from_preferences());
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("config", &crate::config::build_info::source_info()),
    );

    Ok(())
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = Some(FileProcessingContext::new(file_path, file_id)));
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = None);
}

/// Run `f` with `file_path` as this thread's file context
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Send an event to the global service, tagged with the current file.
/// Dropped silently before initialization.
pub fn dispatch(event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let event = match get_current_file_context() {
        Some(file_ctx) if config::include_file_context() => {
            event.with_context("file", &file_ctx.file_path.display().to_string())
        }
        _ => event,
    };
    logger.log_event(event);
}

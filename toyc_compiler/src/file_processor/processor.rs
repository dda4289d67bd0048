//! Source file loading
//!
//! Checks run cheapest first: path, extension, size on disk, then the
//! contents. Every rejection is logged once with its code.

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .c, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        use codes::file_processing::*;
        match self {
            FileProcessorError::FileNotFound { .. } => FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => INVALID_EXTENSION,
            FileProcessorError::FileTooLarge { .. } | FileProcessorError::TooManyLines { .. } => {
                FILE_TOO_LARGE
            }
            FileProcessorError::EmptyFile => EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => PERMISSION_DENIED,
            FileProcessorError::InvalidEncoding { .. } => INVALID_ENCODING,
            FileProcessorError::IoError { .. } => IO_ERROR,
            FileProcessorError::InvalidPath { .. } => INVALID_PATH,
        }
    }

    /// Missing and empty inputs produce no report and a clean exit
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            FileProcessorError::FileNotFound { .. } | FileProcessorError::EmptyFile
        )
    }

    fn from_io(error: io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            _ => FileProcessorError::IoError {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_c_file: bool,
}

impl FileMetadata {
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_c_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_c_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_c_extension: prefs.require_c_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_c_extension_required(mut self, required: bool) -> Self {
        self.require_c_extension = required;
        self
    }

    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        log_debug!("Starting file processing", "file" => file_path);

        match self.load(file_path, start_time) {
            Ok(result) => {
                self.log_processing_success(&result, file_path);
                Ok(result)
            }
            Err(error) => {
                log_error!(error.error_code(), "Input file rejected",
                    "file" => file_path,
                    "reason" => &error);
                Err(error)
            }
        }
    }

    fn load(
        &self,
        file_path: &str,
        start_time: Instant,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let path = resolve_path(file_path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let is_c_file = extension.as_deref() == Some("c");
        if self.require_c_extension && !is_c_file {
            return Err(FileProcessorError::InvalidExtension { extension });
        }

        let size = fs::metadata(&path)
            .map_err(|e| FileProcessorError::from_io(e, &path))?
            .len();
        if size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            });
        }
        if size == 0 {
            return Err(FileProcessorError::EmptyFile);
        }

        let bytes = fs::read(&path).map_err(|e| FileProcessorError::from_io(e, &path))?;
        let source = String::from_utf8(bytes).map_err(|_| FileProcessorError::InvalidEncoding {
            path: path.display().to_string(),
        })?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            return Err(FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            });
        }

        Ok(FileProcessingResult {
            source,
            metadata: FileMetadata {
                path,
                size,
                extension,
                line_count,
                is_c_file,
            },
            processing_duration: start_time.elapsed(),
        })
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File loaded",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File loaded",
                "file" => file_path,
                "lines" => result.metadata.line_count
            );
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical path of an existing regular file
fn resolve_path(file_path: &str) -> Result<PathBuf, FileProcessorError> {
    let invalid = || FileProcessorError::InvalidPath {
        path: file_path.to_string(),
    };
    if file_path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(file_path)
        .canonicalize()
        .map_err(|e| FileProcessorError::from_io(e, Path::new(file_path)))?;
    if !path.is_file() {
        return Err(invalid());
    }
    Ok(path)
}

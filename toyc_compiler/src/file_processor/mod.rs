//! Input file loading with compile-time size limits

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use crate::logging::codes;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Load a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Startup check: codes are registered and the limits are logged
pub fn init_file_processor_logging() -> Result<(), String> {
    use codes::file_processing::*;
    codes::ensure_registered(&[
        FILE_NOT_FOUND,
        INVALID_EXTENSION,
        FILE_TOO_LARGE,
        EMPTY_FILE,
        PERMISSION_DENIED,
        INVALID_ENCODING,
        IO_ERROR,
        INVALID_PATH,
    ])?;

    log_debug!("File processor limits",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_process_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("prog.c");
        fs::write(&file_path, "int x;\n").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.source, "int x;\n");
        assert!(result.metadata.is_c_file);
    }

    #[test]
    fn test_processor_from_preferences() {
        let processor = create_processor_from_preferences(&FileProcessorPreferences {
            require_c_extension: true,
            enable_performance_logging: false,
        });
        assert!(processor.require_c_extension);
        assert!(!processor.enable_performance_logging);
    }

    #[test]
    fn test_init_validation() {
        assert!(init_file_processor_logging().is_ok());
    }
}

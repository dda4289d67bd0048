//! Output file naming and writing

use crate::logging::codes;
use crate::{log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {message}")]
    WriteFailed { path: String, message: String },
}

impl ReportError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ReportError::WriteFailed { .. } => codes::system::OUTPUT_WRITE_FAILURE,
        }
    }
}

fn stem_of(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sibling_path(input: &Path, file_name: String) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// `dir/prog.c` -> `dir/output-prog.txt`
pub fn output_path_for(input: &Path) -> PathBuf {
    sibling_path(input, format!("output-{}.txt", stem_of(input)))
}

/// `dir/prog.c` -> `dir/prog-comments_replaced_with_white_space.c`
pub fn cleaned_source_path_for(input: &Path) -> PathBuf {
    sibling_path(
        input,
        format!("{}-comments_replaced_with_white_space.c", stem_of(input)),
    )
}

pub fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|e| {
        let error = ReportError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Failed to write report",
            "path" => path.display(),
            "io_error" => e);
        error
    })?;

    log_success!(
        codes::success::REPORT_WRITTEN,
        "Report written",
        "path" => path.display(),
        "bytes" => contents.len()
    );
    Ok(())
}

use crate::cst::StructuralError;
use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::report::{render_diagnostic, DiagnosticKind, ReportError};
use crate::symbols::ConflictError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Tree construction failed: {0}")]
    Structure(#[from] StructuralError),

    #[error("Symbol table construction failed: {0}")]
    SymbolTable(#[from] ConflictError),

    #[error("Report output failed: {0}")]
    Report(#[from] ReportError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::Structure(e) => e.error_code(),
            PipelineError::SymbolTable(e) => e.error_code(),
            PipelineError::Report(e) => e.error_code(),
            PipelineError::Pipeline { .. } => crate::logging::codes::system::INTERNAL_ERROR,
        }
    }

    /// The single line written to the report for this error, if any.
    /// Input problems and empty programs produce no report.
    pub fn report_line(&self) -> Option<String> {
        match self {
            PipelineError::LexicalAnalysis(e) => Some(render_diagnostic(
                DiagnosticKind::Syntax,
                e.line(),
                &e.to_string(),
            )),
            PipelineError::Structure(e) => e
                .line()
                .map(|line| render_diagnostic(DiagnosticKind::Syntax, line, &e.to_string())),
            PipelineError::SymbolTable(e) => Some(render_diagnostic(
                DiagnosticKind::Conflict,
                e.line(),
                &e.to_string(),
            )),
            PipelineError::FileProcessing(_)
            | PipelineError::Report(_)
            | PipelineError::Pipeline { .. } => None,
        }
    }

    /// Whether the run should end with a failing exit status. Diagnostics
    /// about the analysed program and missing or empty input do not.
    pub fn is_fatal(&self) -> bool {
        match self {
            PipelineError::FileProcessing(e) => !e.is_missing_input(),
            PipelineError::Report(_) | PipelineError::Pipeline { .. } => true,
            _ => false,
        }
    }
}

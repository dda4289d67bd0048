//! End-to-end front end run
//!
//! Stages run in order and the first failing stage ends the run:
//! file -> comments -> tokens -> tree -> symbols.

mod error;
mod result;
mod validation;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::comments::StrippedSource;
use crate::config::runtime::{LexicalPreferences, RuntimeConfig};
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::report;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Run every stage over in-memory source text
pub fn process_source(text: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_preferences(text, LexicalPreferences::default())
}

pub fn process_source_with_preferences(
    text: &str,
    preferences: LexicalPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let cleaned = crate::comments::strip(text);
    let result = run_stages(cleaned, None, preferences, start_time)?;
    result.log_success("<memory>");
    Ok(result)
}

/// Process a single file with environment-derived configuration
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    let config = RuntimeConfig::from_env()
        .map_err(|e| PipelineError::pipeline_error(&e.to_string()))?;
    process_file_with_config(file_path, &config)
}

/// Process a single file; writes the comment-free copy next to it when
/// the report preferences ask for one
pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(
        PathBuf::from(file_path),
        0,
        || -> Result<PipelineResult, PipelineError> {
            crate::log_info!("Starting front end pipeline",
                "file" => file_path,
                "report" => config.report.report_kind.as_str());

            // Stage 1: File processing
            let processor =
                crate::file_processor::create_processor_from_preferences(&config.file_processor);
            let file_result = processor.process_file(file_path)?;

            // Stage 2: Comment filtering
            let cleaned = crate::comments::strip(&file_result.source);
            if config.report.write_cleaned_source {
                let cleaned_path = report::cleaned_source_path_for(Path::new(file_path));
                report::write_report(&cleaned_path, &cleaned.text)?;
            }

            // Stages 3-5: tokens, tree, symbols
            let result = run_stages(
                cleaned,
                Some(file_result.metadata),
                config.lexical.clone(),
                start_time,
            )?;

            result.log_success(file_path);
            Ok(result)
        },
    )
}

fn run_stages(
    cleaned: StrippedSource,
    file_metadata: Option<FileMetadata>,
    preferences: LexicalPreferences,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError> {
    let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
    let tokens = analyzer.tokenize(&cleaned.text)?;
    let lexical_metrics = analyzer.metrics().clone();

    let tree = crate::cst::build(&tokens)?;
    let registry = crate::symbols::build(&tree)?;

    Ok(PipelineResult {
        file_metadata,
        cleaned,
        tokens,
        lexical_metrics,
        tree,
        registry,
        processing_duration: start_time.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::ReportKind;
    use crate::cst::StructuralError;
    use crate::lexical::LexerError;
    use crate::symbols::ConflictError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn plain() -> LexicalPreferences {
        LexicalPreferences {
            contextual_signs: false,
            collect_detailed_metrics: false,
        }
    }

    #[test]
    fn test_full_run_over_source() {
        let source = "// totals\nint total;\nprocedure main(void)\n{\n  /* loop */ int i;\n}\n";
        let result = process_source_with_preferences(source, plain()).unwrap();

        assert!(result.cleaned.diagnostics.is_empty());
        assert_eq!(result.registry.len(), 3);
        assert!(result.render(ReportKind::Symbols).starts_with("IDENTIFIER_NAME: total\n"));
        assert!(result.render(ReportKind::Tokens).starts_with("Token list:\n\n"));
        assert!(result.render(ReportKind::Cst).starts_with("int -> total -> ; -> NULL\n"));
    }

    #[test]
    fn test_first_failing_stage_wins() {
        assert_matches!(
            process_source_with_preferences("int x = 12a;", plain()),
            Err(PipelineError::LexicalAnalysis(LexerError::MalformedInteger { line: 1 }))
        );
        assert_matches!(
            process_source_with_preferences("int a[-3];", plain()),
            Err(PipelineError::Structure(StructuralError::NegativeArraySize { line: 1 }))
        );
        assert_matches!(
            process_source_with_preferences("int x;\nint x;", plain()),
            Err(PipelineError::SymbolTable(ConflictError::DuplicateGlobal { line: 2, .. }))
        );
    }

    #[test]
    fn test_process_source_with_default_preferences() {
        let result = process_source("function int f(int a)\n{\n  bool b;\n}\n").unwrap();
        assert!(result.file_metadata.is_none());
        assert_eq!(result.registry.parameters_of("f").count(), 1);
        assert_eq!(result.registry.lookup("b", 1).map(|s| s.line), Some(3));
    }

    #[test]
    fn test_comment_only_source_is_empty_tree() {
        let error = process_source_with_preferences("/* nothing */\n", plain()).unwrap_err();
        assert_matches!(error, PipelineError::Structure(StructuralError::EmptyTree));
        assert_eq!(error.report_line(), None);
    }

    #[test]
    fn test_process_file_writes_cleaned_source() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("prog.c");
        fs::write(&input, "int a; // note\n").unwrap();

        let mut config = RuntimeConfig::default();
        config.lexical = plain();
        config.report.write_cleaned_source = true;

        let result = process_file_with_config(input.to_str().unwrap(), &config).unwrap();
        assert_eq!(result.registry.len(), 1);
        assert!(result.file_metadata.is_some());

        let cleaned = fs::read_to_string(dir.path().join("prog-comments_replaced_with_white_space.c"))
            .unwrap();
        assert_eq!(cleaned, format!("int a;{}\n", " ".repeat(8)));
    }

    #[test]
    fn test_missing_file() {
        let error = process_file_with_config("/no/such/prog.c", &RuntimeConfig::default())
            .unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
        assert!(!error.is_fatal());
        assert_eq!(error.report_line(), None);
    }
}

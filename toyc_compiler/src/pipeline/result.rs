use crate::comments::StrippedSource;
use crate::config::runtime::ReportKind;
use crate::cst::ConcreteSyntaxTree;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::logging::codes;
use crate::report;
use crate::symbols::SymbolRegistry;
use crate::tokens::Token;
use std::time::Duration;

/// Products of every stage of a successful run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Present when the run started from a file
    pub file_metadata: Option<FileMetadata>,
    pub cleaned: StrippedSource,
    pub tokens: Vec<Token>,
    pub lexical_metrics: LexicalMetrics,
    pub tree: ConcreteSyntaxTree,
    pub registry: SymbolRegistry,
    pub processing_duration: Duration,
}

impl PipelineResult {
    /// Report text for the requested listing
    pub fn render(&self, kind: ReportKind) -> String {
        match kind {
            ReportKind::Symbols => report::render_symbol_table(&self.registry),
            ReportKind::Tokens => report::render_tokens(&self.tokens),
            ReportKind::Cst => report::render_cst(&self.tree),
        }
    }

    pub fn log_success(&self, source_name: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        crate::log_success!(
            codes::success::FILE_PROCESSING_SUCCESS,
            "Front end pipeline succeeded",
            "source" => source_name,
            "tokens" => self.tokens.len(),
            "nodes" => self.tree.len(),
            "symbols" => self.registry.len(),
            "comment_warnings" => self.cleaned.diagnostics.len(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "processing_rate_tokens_per_sec" => format!("{:.0}",
                if seconds > 0.0 { self.tokens.len() as f64 / seconds } else { 0.0 })
        );
    }
}

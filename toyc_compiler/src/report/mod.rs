//! Plain-text reports written next to the input file

pub mod output;
pub mod render;

pub use output::{cleaned_source_path_for, output_path_for, write_report, ReportError};
pub use render::{render_cst, render_diagnostic, render_symbol_table, render_tokens, DiagnosticKind};

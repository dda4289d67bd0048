//! Comment removal ahead of tokenization
//!
//! Comment bodies are replaced with spaces so the cleaned text keeps the
//! same line structure as the input. Problems found here are warnings: the
//! cleaned text is always produced.

pub mod filter;

pub use filter::{CommentDiagnostic, CommentFilter, StrippedSource};

/// Strip comments from `text` with a fresh filter
pub fn strip(text: &str) -> StrippedSource {
    CommentFilter::new().strip(text)
}

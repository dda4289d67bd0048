//! Lexical analysis
//!
//! Turns comment-free source text into a flat token list. Scanning stops at
//! the first malformed lexeme; no partial token list is returned.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::Token;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Tokenize with environment-derived preferences
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::new().tokenize(text)
}

/// Tokenize with explicit runtime preferences
pub fn tokenize_with_preferences(
    text: &str,
    preferences: LexicalPreferences,
) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize(text)
}

/// Validate lexical codes and log the active limits (startup check)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::INVALID_CHARACTER,
        crate::logging::codes::lexical::UNTERMINATED_STRING,
        crate::logging::codes::lexical::MALFORMED_INTEGER,
        crate::logging::codes::lexical::IDENTIFIER_TOO_LONG,
        crate::logging::codes::lexical::STRING_TOO_LARGE,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
    ];

    crate::logging::codes::ensure_registered(&lexical_codes)?;

    crate::log_debug!("Lexical limits initialized",
        "max_string_size" => MAX_STRING_SIZE,
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT);

    Ok(())
}

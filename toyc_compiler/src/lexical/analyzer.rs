//! Finite-state scanner producing the flat token list

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::HashMap;

/// Lexical errors. The display text is the message used in reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("unterminated string quote.")]
    UnterminatedString { line: u32 },

    #[error("invalid integer.")]
    MalformedInteger { line: u32 },

    #[error("invalid character '{character}'.")]
    InvalidCharacter { character: char, line: u32 },

    #[error("identifier too long ({length} characters, max {MAX_IDENTIFIER_LENGTH}).")]
    IdentifierTooLong { length: usize, line: u32 },

    #[error("string too large ({size} bytes, max {MAX_STRING_SIZE}).")]
    StringTooLarge { size: usize, line: u32 },

    #[error("too many tokens (max {MAX_TOKEN_COUNT}).")]
    TooManyTokens { line: u32 },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::MalformedInteger { .. } => codes::lexical::MALFORMED_INTEGER,
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            LexerError::UnterminatedString { line }
            | LexerError::MalformedInteger { line }
            | LexerError::InvalidCharacter { line, .. }
            | LexerError::IdentifierTooLong { line, .. }
            | LexerError::StringTooLarge { line, .. }
            | LexerError::TooManyTokens { line } => *line,
        }
    }
}

/// Counters gathered during one tokenization run
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub identifier_tokens: usize,
    pub integer_tokens: usize,
    pub string_tokens: usize,
    pub operator_tokens: usize,
    pub folded_signs: usize,
    pub max_string_length: usize,
    pub max_identifier_length: usize,
    pub lines_scanned: u32,

    // Only filled when detailed metrics are enabled
    pub kind_counts: HashMap<TokenKind, usize>,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        match token.kind {
            TokenKind::Identifier => {
                self.identifier_tokens += 1;
                self.max_identifier_length = self.max_identifier_length.max(token.text.len());
            }
            TokenKind::Integer => self.integer_tokens += 1,
            TokenKind::String => {
                self.string_tokens += 1;
                self.max_string_length = self.max_string_length.max(token.text.len());
            }
            TokenKind::Assignment
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Divide
            | TokenKind::Modulo
            | TokenKind::Caret
            | TokenKind::LessThan
            | TokenKind::GreaterThan
            | TokenKind::LessThanOrEqual
            | TokenKind::GreaterThanOrEqual
            | TokenKind::BooleanAnd
            | TokenKind::BooleanOr
            | TokenKind::BooleanNot
            | TokenKind::BooleanEqual
            | TokenKind::NotEqual => self.operator_tokens += 1,
            _ => {}
        }

        if preferences.collect_detailed_metrics {
            *self.kind_counts.entry(token.kind).or_insert(0) += 1;
        }
    }
}

/// Scanner states. Every token category has its own state; `Start`
/// decides which one the next character begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    EscapedCharacter,
    Punctuation(TokenKind),
    TwoCharOperator(TokenKind),
    OpeningQuote(char),
    StringBody { quote: char, opened_on: u32 },
    ClosingQuote(char),
    Integer,
    Identifier,
}

fn quote_kind(quote: char) -> TokenKind {
    if quote == '\'' {
        TokenKind::SingleQuote
    } else {
        TokenKind::DoubleQuote
    }
}

/// Character cursor with line tracking
struct Cursor {
    chars: Vec<char>,
    index: usize,
    pos: Position,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            pos: Position::start(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    fn line(&self) -> u32 {
        self.pos.line
    }
}

/// Lexical analyzer with runtime preferences and compile-time limits
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Scan `text` into tokens, stopping at the first error
    pub fn tokenize(&mut self, text: &str) -> Result<Vec<Token>, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "chars" => text.len(),
            "contextual_signs" => self.preferences.contextual_signs,
            "max_tokens_allowed" => MAX_TOKEN_COUNT);

        let mut cursor = Cursor::new(text);
        let mut tokens = Vec::new();

        if let Err(error) = self.scan(&mut cursor, &mut tokens) {
            log_error!(error.error_code(), "Tokenization failed",
                span = Span::single(cursor.pos),
                "line" => error.line(),
                "reason" => &error,
                "tokens_before_error" => tokens.len());
            return Err(error);
        }

        self.metrics.lines_scanned = cursor.line();

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "tokens" => self.metrics.total_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "integers" => self.metrics.integer_tokens,
            "strings" => self.metrics.string_tokens,
            "folded_signs" => self.metrics.folded_signs,
            "lines" => self.metrics.lines_scanned
        );

        Ok(tokens)
    }

    fn scan(&mut self, cursor: &mut Cursor, tokens: &mut Vec<Token>) -> Result<(), LexerError> {
        let mut state = ScanState::Start;

        loop {
            state = match state {
                ScanState::Start => {
                    while cursor.peek().is_some_and(char::is_whitespace) {
                        cursor.bump();
                    }
                    match cursor.peek() {
                        None => return Ok(()),
                        Some(ch) => self.classify(ch, cursor, tokens.last())?,
                    }
                }

                ScanState::EscapedCharacter => {
                    let line = cursor.line();
                    let mut text = String::new();
                    while let Some(ch) = cursor.peek().filter(|c| !c.is_whitespace()) {
                        text.push(ch);
                        cursor.bump();
                    }
                    self.emit(tokens, TokenKind::EscapedCharacter, text, line)?;
                    ScanState::Start
                }

                ScanState::Punctuation(kind) => {
                    let line = cursor.line();
                    let text = cursor.bump().map(String::from).unwrap_or_default();
                    self.emit(tokens, kind, text, line)?;
                    ScanState::Start
                }

                ScanState::TwoCharOperator(kind) => {
                    let line = cursor.line();
                    let text: String = [cursor.bump(), cursor.bump()].into_iter().flatten().collect();
                    self.emit(tokens, kind, text, line)?;
                    ScanState::Start
                }

                ScanState::OpeningQuote(quote) => {
                    let opened_on = cursor.line();
                    cursor.bump();
                    self.emit(tokens, quote_kind(quote), quote.to_string(), opened_on)?;
                    ScanState::StringBody { quote, opened_on }
                }

                ScanState::StringBody { quote, opened_on } => {
                    let line = cursor.line();
                    let body = Self::read_string_body(cursor, quote, opened_on)?;
                    if body.len() > MAX_STRING_SIZE {
                        return Err(LexerError::StringTooLarge {
                            size: body.len(),
                            line,
                        });
                    }
                    if !body.is_empty() {
                        self.emit(tokens, TokenKind::String, body, line)?;
                    }
                    ScanState::ClosingQuote(quote)
                }

                ScanState::ClosingQuote(quote) => {
                    let line = cursor.line();
                    cursor.bump();
                    self.emit(tokens, quote_kind(quote), quote.to_string(), line)?;
                    ScanState::Start
                }

                ScanState::Integer => {
                    let line = cursor.line();
                    let mut text = String::new();
                    match cursor.peek() {
                        Some('-') => {
                            text.push('-');
                            cursor.bump();
                            self.metrics.folded_signs += 1;
                        }
                        Some('+') => {
                            // A folded plus sign is not kept
                            cursor.bump();
                            self.metrics.folded_signs += 1;
                        }
                        _ => {}
                    }
                    while let Some(digit) = cursor.peek().filter(char::is_ascii_digit) {
                        text.push(digit);
                        cursor.bump();
                    }
                    if cursor.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                        return Err(LexerError::MalformedInteger {
                            line: cursor.line(),
                        });
                    }
                    self.emit(tokens, TokenKind::Integer, text, line)?;
                    ScanState::Start
                }

                ScanState::Identifier => {
                    let line = cursor.line();
                    let mut text = String::new();
                    while let Some(ch) = cursor
                        .peek()
                        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                    {
                        text.push(ch);
                        cursor.bump();
                    }
                    if text.len() > MAX_IDENTIFIER_LENGTH {
                        return Err(LexerError::IdentifierTooLong {
                            length: text.len(),
                            line,
                        });
                    }
                    self.emit(tokens, TokenKind::Identifier, text, line)?;
                    ScanState::Start
                }
            };
        }
    }

    /// Pick the state for the token starting at `ch`
    fn classify(
        &self,
        ch: char,
        cursor: &Cursor,
        previous: Option<&Token>,
    ) -> Result<ScanState, LexerError> {
        let next = cursor.peek_second();

        let state = match (ch, next) {
            ('\\', _) => ScanState::EscapedCharacter,
            ('"', _) | ('\'', _) => ScanState::OpeningQuote(ch),
            ('+', Some(d)) | ('-', Some(d)) if d.is_ascii_digit() && self.sign_may_fold(previous) => {
                ScanState::Integer
            }
            ('<', Some('=')) => ScanState::TwoCharOperator(TokenKind::LessThanOrEqual),
            ('>', Some('=')) => ScanState::TwoCharOperator(TokenKind::GreaterThanOrEqual),
            ('=', Some('=')) => ScanState::TwoCharOperator(TokenKind::BooleanEqual),
            ('!', Some('=')) => ScanState::TwoCharOperator(TokenKind::NotEqual),
            ('&', Some('&')) => ScanState::TwoCharOperator(TokenKind::BooleanAnd),
            ('|', Some('|')) => ScanState::TwoCharOperator(TokenKind::BooleanOr),
            _ if ch.is_ascii_digit() => ScanState::Integer,
            _ if ch.is_ascii_alphabetic() || ch == '_' => ScanState::Identifier,
            _ => match TokenKind::from_single_char(ch) {
                Some(kind) => ScanState::Punctuation(kind),
                None => {
                    return Err(LexerError::InvalidCharacter {
                        character: ch,
                        line: cursor.line(),
                    })
                }
            },
        };

        Ok(state)
    }

    /// With contextual signs on, a sign right after an operand is binary
    fn sign_may_fold(&self, previous: Option<&Token>) -> bool {
        if !self.preferences.contextual_signs {
            return true;
        }
        !previous.is_some_and(|token| token.kind.ends_operand())
    }

    /// Read a quoted body up to (not including) the closing quote.
    /// A backslash keeps itself and the following character.
    fn read_string_body(
        cursor: &mut Cursor,
        quote: char,
        opened_on: u32,
    ) -> Result<String, LexerError> {
        let mut body = String::new();
        loop {
            match cursor.peek() {
                None => return Err(LexerError::UnterminatedString { line: opened_on }),
                Some(ch) if ch == quote => return Ok(body),
                Some('\\') => {
                    body.push('\\');
                    cursor.bump();
                    match cursor.bump() {
                        Some(escaped) => body.push(escaped),
                        None => return Err(LexerError::UnterminatedString { line: opened_on }),
                    }
                }
                Some(ch) => {
                    body.push(ch);
                    cursor.bump();
                }
            }
        }
    }

    fn emit(
        &mut self,
        tokens: &mut Vec<Token>,
        kind: TokenKind,
        text: String,
        line: u32,
    ) -> Result<(), LexerError> {
        if tokens.len() >= MAX_TOKEN_COUNT {
            return Err(LexerError::TooManyTokens { line });
        }
        let token = Token::new(kind, text, line);
        self.metrics.record_token(&token, &self.preferences);
        tokens.push(token);
        Ok(())
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn analyzer() -> LexicalAnalyzer {
        LexicalAnalyzer::with_preferences(LexicalPreferences {
            contextual_signs: false,
            collect_detailed_metrics: true,
        })
    }

    fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = analyzer().tokenize("int x ;").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Identifier, "int", 1),
                Token::new(TokenKind::Identifier, "x", 1),
                Token::new(TokenKind::Semicolon, ";", 1),
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = analyzer().tokenize("a<=b>=c==d!=e&&f||!g<h>i=j%k^l*m/n").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::LessThanOrEqual));
        assert!(kinds.contains(&TokenKind::GreaterThanOrEqual));
        assert!(kinds.contains(&TokenKind::BooleanEqual));
        assert!(kinds.contains(&TokenKind::NotEqual));
        assert!(kinds.contains(&TokenKind::BooleanAnd));
        assert!(kinds.contains(&TokenKind::BooleanOr));
        assert!(kinds.contains(&TokenKind::BooleanNot));
        assert!(kinds.contains(&TokenKind::Caret));
        assert!(kinds.contains(&TokenKind::Modulo));
        assert_eq!(tokens[1].text, "<=");
    }

    #[test]
    fn test_string_literal_tokens() {
        let tokens = analyzer().tokenize("printf(\"hi there\\n\");").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "printf"),
                (TokenKind::LeftParenthesis, "("),
                (TokenKind::DoubleQuote, "\""),
                (TokenKind::String, "hi there\\n"),
                (TokenKind::DoubleQuote, "\""),
                (TokenKind::RightParenthesis, ")"),
                (TokenKind::Semicolon, ";"),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let tokens = analyzer().tokenize("'\\''").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::SingleQuote, "'"),
                (TokenKind::String, "\\'"),
                (TokenKind::SingleQuote, "'"),
            ]
        );
    }

    #[test]
    fn test_empty_string_has_no_body_token() {
        let tokens = analyzer().tokenize("\"\"").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::DoubleQuote));
    }

    #[test]
    fn test_unterminated_string_reports_opening_line() {
        let result = analyzer().tokenize("int x;\nprintf(\"abc\n\ndef");
        assert_matches!(result, Err(LexerError::UnterminatedString { line: 2 }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "unterminated string quote."
        );
    }

    #[test]
    fn test_malformed_integer() {
        let result = analyzer().tokenize("int x;\nx = 12ab;");
        assert_matches!(result, Err(LexerError::MalformedInteger { line: 2 }));
    }

    #[test]
    fn test_invalid_characters() {
        assert_matches!(
            analyzer().tokenize("int @;"),
            Err(LexerError::InvalidCharacter { character: '@', line: 1 })
        );
        assert_matches!(
            analyzer().tokenize("a & b"),
            Err(LexerError::InvalidCharacter { character: '&', .. })
        );
        assert_matches!(
            analyzer().tokenize("a | b"),
            Err(LexerError::InvalidCharacter { character: '|', .. })
        );
    }

    #[test]
    fn test_sign_folding() {
        let tokens = analyzer().tokenize("x = -5 + +7;").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::Assignment, "="),
                (TokenKind::Integer, "-5"),
                (TokenKind::Plus, "+"),
                (TokenKind::Integer, "7"),
                (TokenKind::Semicolon, ";"),
            ]
        );
        assert_eq!(tokens[2].line, 1);
    }

    #[test]
    fn test_sign_folds_after_operand_by_default() {
        let tokens = analyzer().tokenize("x-1").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![(TokenKind::Identifier, "x"), (TokenKind::Integer, "-1")]
        );
    }

    #[test]
    fn test_contextual_signs() {
        let mut lexer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            contextual_signs: true,
            collect_detailed_metrics: false,
        });
        let tokens = lexer.tokenize("x-1; y = (-2)").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::Minus, "-"),
                (TokenKind::Integer, "1"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Identifier, "y"),
                (TokenKind::Assignment, "="),
                (TokenKind::LeftParenthesis, "("),
                (TokenKind::Integer, "-2"),
                (TokenKind::RightParenthesis, ")"),
            ]
        );
    }

    #[test]
    fn test_escaped_character_outside_string() {
        let tokens = analyzer().tokenize("\\n x").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::EscapedCharacter, "\\n"),
                (TokenKind::Identifier, "x"),
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = analyzer()
            .tokenize("int a;\n\n\tchar b;\n\"x\ny\" z")
            .unwrap();
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 3, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn test_identifiers_with_underscores() {
        let tokens = analyzer().tokenize("_tmp my_var2").unwrap();
        assert_eq!(tokens[0].text, "_tmp");
        assert_eq!(tokens[1].text, "my_var2");
    }

    #[test]
    fn test_deterministic() {
        let source = "function int f(int a) { return a + -1; }";
        let first = analyzer().tokenize(source).unwrap();
        let second = analyzer().tokenize(source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metrics() {
        let mut lexer = analyzer();
        lexer.tokenize("int x = 3; char c = 'a';").unwrap();
        let metrics = lexer.metrics();
        assert_eq!(metrics.identifier_tokens, 4);
        assert_eq!(metrics.integer_tokens, 1);
        assert_eq!(metrics.string_tokens, 1);
        assert_eq!(metrics.kind_counts.get(&TokenKind::SingleQuote), Some(&2));
    }

    #[test]
    fn test_error_codes() {
        let error = LexerError::InvalidCharacter {
            character: '$',
            line: 4,
        };
        assert_eq!(error.error_code(), codes::lexical::INVALID_CHARACTER);
        assert_eq!(error.line(), 4);
        assert_eq!(error.to_string(), "invalid character '$'.");
    }
}

//! Token and token kind definitions
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every category the scanner can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Grouping
    LeftParenthesis,  // (
    RightParenthesis, // )
    LeftBracket,      // [
    RightBracket,     // ]
    LeftBrace,        // {
    RightBrace,       // }

    // Quotes
    DoubleQuote, // "
    SingleQuote, // '

    // Punctuation
    Semicolon, // ;
    Comma,     // ,

    // Arithmetic
    Assignment, // =
    Plus,       // +
    Minus,      // -
    Asterisk,   // *
    Divide,     // /
    Modulo,     // %
    Caret,      // ^

    // Relational
    LessThan,           // <
    GreaterThan,        // >
    LessThanOrEqual,    // <=
    GreaterThanOrEqual, // >=

    // Boolean
    BooleanAnd,   // &&
    BooleanOr,    // ||
    BooleanNot,   // !
    BooleanEqual, // ==
    NotEqual,     // !=

    // Payload-carrying
    String,
    Integer,
    Identifier,
    EscapedCharacter,
}

impl TokenKind {
    /// Listing name used in token reports
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::LeftParenthesis => "LEFT_PARENTHESIS",
            TokenKind::RightParenthesis => "RIGHT_PARENTHESIS",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::DoubleQuote => "DOUBLE_QUOTE",
            TokenKind::SingleQuote => "SINGLE_QUOTE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Assignment => "ASSIGNMENT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::Caret => "CARET",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            TokenKind::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            TokenKind::BooleanAnd => "BOOLEAN_AND",
            TokenKind::BooleanOr => "BOOLEAN_OR",
            TokenKind::BooleanNot => "BOOLEAN_NOT",
            TokenKind::BooleanEqual => "BOOLEAN_EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::String => "STRING",
            TokenKind::Integer => "INTEGER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::EscapedCharacter => "ESCAPED_CHARACTER",
        }
    }

    /// Kind of a single-character punctuation or operator token
    pub fn from_single_char(ch: char) -> Option<Self> {
        let kind = match ch {
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Assignment,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Divide,
            '%' => TokenKind::Modulo,
            '^' => TokenKind::Caret,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '!' => TokenKind::BooleanNot,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether a token of this kind can end an operand, so a following
    /// sign must be a binary operator
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Integer
                | TokenKind::String
                | TokenKind::RightParenthesis
                | TokenKind::RightBracket
                | TokenKind::DoubleQuote
                | TokenKind::SingleQuote
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One lexeme with its starting line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_text(&self, text: &str) -> bool {
        self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) line {}", self.kind, self.text, self.line)
    }
}

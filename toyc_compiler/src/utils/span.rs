//! Source location tracking
//!
//! Tokens only carry their starting line. The lexer tracks full positions so
//! that a failed scan can log the column it stopped at.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character position in cleaned source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Characters consumed so far
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Position after consuming `ch`
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.offset + 1, self.line + 1, 1)
        } else {
            Self::new(self.offset + 1, self.line, self.column + 1)
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range of positions attached to log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The one character at `pos`
    pub fn single(pos: Position) -> Self {
        Self::new(pos, Position::new(pos.offset + 1, pos.line, pos.column + 1))
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "{}:{}", self.start.line, self.start.column)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_over_newline() {
        let pos = "ab\nc".chars().fold(Position::start(), Position::advance);
        assert_eq!(pos, Position::new(4, 2, 2));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::single(Position::new(4, 3, 5)).to_string(), "3:5");

        let multiline = Span::new(Position::new(0, 1, 1), Position::new(9, 2, 3));
        assert_eq!(multiline.to_string(), "1:1..2:3");
    }
}

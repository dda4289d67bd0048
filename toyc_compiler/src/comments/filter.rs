//! Single-pass comment filter

use crate::logging::codes;
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;
use std::fmt;

/// Non-fatal findings of the comment filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentDiagnostic {
    /// `*/` seen outside of any block comment
    StrayTerminator { line: u32 },
    /// Block comment still open at end of input, reported at its opening line
    UnterminatedBlock { line: u32 },
}

impl CommentDiagnostic {
    pub fn line(&self) -> u32 {
        match self {
            CommentDiagnostic::StrayTerminator { line }
            | CommentDiagnostic::UnterminatedBlock { line } => *line,
        }
    }

    pub fn code(&self) -> crate::logging::Code {
        match self {
            CommentDiagnostic::StrayTerminator { .. } => codes::comments::STRAY_TERMINATOR,
            CommentDiagnostic::UnterminatedBlock { .. } => codes::comments::UNTERMINATED_BLOCK,
        }
    }
}

impl fmt::Display for CommentDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "program contains C-style, unterminated comment on line {}",
            self.line()
        )
    }
}

/// Cleaned text plus any warnings raised while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedSource {
    pub text: String,
    pub diagnostics: Vec<CommentDiagnostic>,
}

impl StrippedSource {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Normal,
    LineComment,
    BlockComment { opened_on: u32 },
    Literal { quote: char, escaped: bool },
}

/// Comment filter state machine
#[derive(Debug, Default)]
pub struct CommentFilter {
    comment_chars: usize,
}

impl CommentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters blanked by the last call to [`strip`](Self::strip)
    pub fn comment_chars(&self) -> usize {
        self.comment_chars
    }

    pub fn strip(&mut self, text: &str) -> StrippedSource {
        log_debug!("Starting comment filter", "chars" => text.len());

        self.comment_chars = 0;
        let mut output = String::with_capacity(text.len());
        let mut diagnostics = Vec::new();
        let mut state = FilterState::Normal;
        let mut line: u32 = 1;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            let next = chars.peek().copied();

            state = match state {
                FilterState::Normal => match (ch, next) {
                    ('/', Some('/')) => {
                        chars.next();
                        self.blank(&mut output, 2);
                        FilterState::LineComment
                    }
                    ('/', Some('*')) => {
                        chars.next();
                        self.blank(&mut output, 2);
                        FilterState::BlockComment { opened_on: line }
                    }
                    ('*', Some('/')) => {
                        let diagnostic = CommentDiagnostic::StrayTerminator { line };
                        log_warning!(code = diagnostic.code(), "Comment terminator without an opening comment",
                            "line" => line);
                        diagnostics.push(diagnostic);
                        output.push(ch);
                        FilterState::Normal
                    }
                    ('"', _) | ('\'', _) => {
                        output.push(ch);
                        FilterState::Literal {
                            quote: ch,
                            escaped: false,
                        }
                    }
                    _ => {
                        output.push(ch);
                        FilterState::Normal
                    }
                },

                FilterState::LineComment => {
                    if ch == '\n' {
                        output.push('\n');
                        FilterState::Normal
                    } else {
                        self.blank(&mut output, 1);
                        FilterState::LineComment
                    }
                }

                FilterState::BlockComment { opened_on } => match (ch, next) {
                    ('*', Some('/')) => {
                        chars.next();
                        self.blank(&mut output, 2);
                        FilterState::Normal
                    }
                    ('\n', _) => {
                        output.push('\n');
                        state
                    }
                    _ => {
                        self.blank(&mut output, 1);
                        FilterState::BlockComment { opened_on }
                    }
                },

                FilterState::Literal { quote, escaped } => {
                    output.push(ch);
                    if escaped {
                        FilterState::Literal {
                            quote,
                            escaped: false,
                        }
                    } else if ch == '\\' {
                        FilterState::Literal {
                            quote,
                            escaped: true,
                        }
                    } else if ch == quote {
                        FilterState::Normal
                    } else {
                        state
                    }
                }
            };

            if ch == '\n' {
                line += 1;
            }
        }

        if let FilterState::BlockComment { opened_on } = state {
            let diagnostic = CommentDiagnostic::UnterminatedBlock { line: opened_on };
            log_warning!(code = diagnostic.code(), "Block comment reaches end of input",
                "line" => opened_on);
            diagnostics.push(diagnostic);
        }

        log_success!(
            codes::success::COMMENT_FILTER_COMPLETE,
            "Comment filter completed",
            "lines" => line,
            "comment_chars" => self.comment_chars,
            "warnings" => diagnostics.len()
        );

        StrippedSource {
            text: output,
            diagnostics,
        }
    }

    fn blank(&mut self, output: &mut String, count: usize) {
        for _ in 0..count {
            output.push(' ');
        }
        self.comment_chars += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_line_comment_blanked() {
        let result = CommentFilter::new().strip("int x; // note\nint y;");
        assert_eq!(result.text, "int x;        \nint y;");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_block_comment_keeps_lines() {
        let source = "int a; /* one\ntwo */ int b;";
        let result = CommentFilter::new().strip(source);
        assert_eq!(result.text, "int a;       \n       int b;");
        assert_eq!(result.text.lines().count(), source.lines().count());
        assert_eq!(result.text.chars().count(), source.chars().count());
    }

    #[test]
    fn test_quoted_text_untouched() {
        let source = "printf(\"// not a comment /* either */\");";
        let result = CommentFilter::new().strip(source);
        assert_eq!(result.text, source);

        let escaped = "printf(\"a \\\" // still inside\");";
        assert_eq!(CommentFilter::new().strip(escaped).text, escaped);

        let single = "char c = '/'; // gone";
        assert_eq!(CommentFilter::new().strip(single).text, "char c = '/';        ");
    }

    #[test]
    fn test_opening_markers_are_consumed_together() {
        // The `*` of `/*` cannot also close the comment
        let result = CommentFilter::new().strip("/*/ x */y");
        assert_eq!(result.text, "        y");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_unterminated_block_reported_at_opening_line() {
        let result = CommentFilter::new().strip("int x;\n/* open\n\nint y;");
        assert_eq!(result.diagnostics.len(), 1);
        assert_matches!(
            result.diagnostics[0],
            CommentDiagnostic::UnterminatedBlock { line: 2 }
        );
        assert_eq!(result.text.lines().count(), 4);
    }

    #[test]
    fn test_stray_terminator_warns() {
        let result = CommentFilter::new().strip("int x;\nint y; */");
        assert_eq!(
            result.diagnostics,
            vec![CommentDiagnostic::StrayTerminator { line: 2 }]
        );
        assert_eq!(result.text, "int x;\nint y; */");
        assert_eq!(
            result.diagnostics[0].to_string(),
            "program contains C-style, unterminated comment on line 2"
        );
    }

    #[test]
    fn test_strip_is_idempotent() {
        let sources = [
            "int x; // a\n/* b */ int y;",
            "char s[4] = \"/*\"; /* c\n */",
            "/* never closed\nint z;",
        ];
        for source in sources {
            let once = CommentFilter::new().strip(source).text;
            let twice = CommentFilter::new().strip(&once).text;
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_comment_char_count() {
        let mut filter = CommentFilter::new();
        filter.strip("x // ab");
        assert_eq!(filter.comment_chars(), 5);

        let mut filter = CommentFilter::new();
        filter.strip("/* a */");
        assert_eq!(filter.comment_chars(), 7);
    }
}
